#![allow(missing_docs)]

use itemcodec::codec::{DecodeOptions, EncodeOptions, Item, decode_record, encode_record};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Address {
	street: String,
	number: u32,
}

itemcodec::record! {
	#[derive(Debug, Clone, Default, PartialEq)]
	struct Profile {
		#[attr = "n"]
		name: String,
		age: i8,
		balance: i64,
		visits: u64,
		ratio: f64,
		weight: f32,
		active: bool,
		tags: Vec<String>,
		scores: Vec<i32>,
		readings: Vec<f64>,
		address: Address,
		previous: Option<Address>,
		nickname: Option<String>,
	}
}

fn finite_f64() -> impl Strategy<Value = f64> {
	any::<f64>().prop_filter("finite", |value| value.is_finite())
}

fn arb_address() -> impl Strategy<Value = Address> {
	(".*", any::<u32>()).prop_map(|(street, number)| Address { street, number })
}

fn arb_profile() -> impl Strategy<Value = Profile> {
	let scalars = (
		".*",
		any::<i8>(),
		any::<i64>(),
		any::<u64>(),
		finite_f64(),
		any::<f32>().prop_filter("finite", |value| value.is_finite()),
		any::<bool>(),
	);
	let collections = (
		prop::collection::vec(".*", 0..8),
		prop::collection::vec(any::<i32>(), 0..8),
		prop::collection::vec(finite_f64(), 0..8),
	);
	let composites = (arb_address(), proptest::option::of(arb_address()), proptest::option::of("[a-z]{1,8}"));

	(scalars, collections, composites).prop_map(
		|((name, age, balance, visits, ratio, weight, active), (tags, scores, readings), (address, previous, nickname))| Profile {
			name,
			age,
			balance,
			visits,
			ratio,
			weight,
			active,
			tags,
			scores,
			readings,
			address,
			previous,
			nickname,
		},
	)
}

proptest! {
	#[test]
	fn encode_then_decode_reproduces_fields(profile in arb_profile()) {
		let item = encode_record(&profile, &EncodeOptions::default()).expect("profile encodes");

		let mut decoded = Profile::default();
		decode_record(&item, &mut decoded, &DecodeOptions::default()).expect("item decodes");
		prop_assert_eq!(decoded, profile);
	}

	#[test]
	fn wire_json_preserves_items(profile in arb_profile()) {
		let item = encode_record(&profile, &EncodeOptions::default()).expect("profile encodes");

		let wire = serde_json::to_string(&item).expect("item serializes");
		let parsed: Item = serde_json::from_str(&wire).expect("wire json parses");
		prop_assert_eq!(&parsed, &item);

		let mut decoded = Profile::default();
		decode_record(&parsed, &mut decoded, &DecodeOptions::default()).expect("item decodes");
		prop_assert_eq!(decoded, profile);
	}
}

#[test]
fn concrete_profile_round_trips() {
	let profile = Profile {
		name: "abc".to_owned(),
		age: -5,
		tags: vec!["a".to_owned(), "b".to_owned()],
		address: Address {
			street: "Main".to_owned(),
			number: 1,
		},
		..Profile::default()
	};
	let item = encode_record(&profile, &EncodeOptions::default()).expect("profile encodes");
	assert_eq!(item["n"].s.as_deref(), Some("abc"));
	assert_eq!(item["tags"].ss.as_deref(), Some(&["a".to_owned(), "b".to_owned()][..]));
	assert_eq!(item["address"].s.as_deref(), Some(r#"{"street":"Main","number":1}"#));
	assert!(!item.contains_key("nickname"));

	let mut decoded = Profile::default();
	decode_record(&item, &mut decoded, &DecodeOptions::default()).expect("item decodes");
	assert_eq!(decoded, profile);
}
