use std::collections::BTreeMap;

use crate::codec::{AttributeValue, Payload, VariantTag};

#[test]
fn extract_reports_each_single_variant() {
	let mut entries = BTreeMap::new();
	entries.insert("KeyKey".to_owned(), AttributeValue::string("StringString"));

	let cases = [
		(AttributeValue::binary(b"Some Bytes".to_vec()), VariantTag::B),
		(AttributeValue::boolean(true), VariantTag::Bool),
		(AttributeValue::binary_set(vec![Vec::new()]), VariantTag::Bs),
		(AttributeValue::list(vec![AttributeValue::default()]), VariantTag::L),
		(AttributeValue::map(entries), VariantTag::M),
		(AttributeValue::number("-1"), VariantTag::N),
		(AttributeValue::number_set(vec!["-1".to_owned()]), VariantTag::Ns),
		(AttributeValue::null(false), VariantTag::Null),
		(AttributeValue::string("StringString"), VariantTag::S),
		(AttributeValue::string_set(vec!["StringString".to_owned()]), VariantTag::Ss),
	];

	for (value, expected) in cases {
		let payload = value.extract().expect("variant is populated");
		assert_eq!(payload.tag(), expected, "value {value:?}");
	}
}

#[test]
fn extract_prefers_precedence_order_on_malformed_values() {
	let value = AttributeValue {
		s: Some("text".to_owned()),
		n: Some("5".to_owned()),
		bool: Some(false),
		..AttributeValue::default()
	};

	assert_eq!(value.extract(), Some(Payload::Bool(false)));
	let tags: Vec<_> = value.payloads().map(|payload| payload.tag()).collect();
	assert_eq!(tags, vec![VariantTag::Bool, VariantTag::N, VariantTag::S]);
}

#[test]
fn empty_collections_are_not_populated() {
	let value = AttributeValue {
		ss: Some(Vec::new()),
		l: Some(Vec::new()),
		m: Some(BTreeMap::new()),
		n: Some("7".to_owned()),
		..AttributeValue::default()
	};

	assert_eq!(value.extract(), Some(Payload::N("7")));
	assert_eq!(AttributeValue::default().extract(), None);
	assert_eq!(AttributeValue::string_set(Vec::new()).extract(), None);
}

#[test]
fn empty_binary_block_still_counts() {
	let value = AttributeValue::binary(Vec::new());
	assert_eq!(value.extract(), Some(Payload::B(&[])));
}

#[test]
fn precedence_is_alphabetical_by_wire_name() {
	let names: Vec<_> = VariantTag::PRECEDENCE.iter().map(|tag| tag.as_str()).collect();
	let mut sorted = names.clone();
	sorted.sort_unstable();
	assert_eq!(names, sorted);
}
