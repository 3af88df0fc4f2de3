use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codec::{AttributeValue, CodecError, EncodeOptions, Item, encode_record, encode_record_into};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Inner {
	#[serde(rename = "TInt")]
	t_int: i32,
	#[serde(rename = "TFloat32")]
	t_float32: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum Color {
	Red,
}

crate::record! {
	struct Primitives {
		t_string: String,
		t_int8: i8,
		t_int64: i64,
		t_uint16: u16,
		t_uint64: u64,
		t_wide: i128,
		t_float32: f32,
		t_float64: f64,
		t_bool: bool,
		t_char: char,
	}
}

crate::record! {
	struct Person {
		#[attr = "n"]
		name: String,
		#[attr = "Age"]
		age: i32,
	}
}

crate::record! {
	struct Collections {
		#[attr = "Tags"]
		tags: Vec<String>,
		counts: Vec<u32>,
		flags: Vec<bool>,
		pair: (i32, f64),
		blocks: Vec<Vec<u8>>,
		empty: Vec<String>,
	}
}

crate::record! {
	struct Composites {
		inner: Inner,
		lookup: BTreeMap<String, i32>,
		color: Color,
		maybe: Option<Inner>,
	}
}

crate::record! {
	struct Five {
		a: String,
		b: i32,
		c: f64,
		d: String,
		e: i32,
	}
}

crate::record! {
	struct Zeros {
		count: u8,
		ratio: f64,
		enabled: bool,
		label: String,
	}
}

crate::record! {
	struct Optionals {
		missing: Option<i32>,
		present: Option<i32>,
		boxed: Box<String>,
	}
}

fn s(text: &str) -> AttributeValue {
	AttributeValue::string(text)
}

fn n(text: &str) -> AttributeValue {
	AttributeValue::number(text)
}

fn texts(items: &[&str]) -> Vec<String> {
	items.iter().map(|item| (*item).to_owned()).collect()
}

#[test]
fn encodes_primitive_fields() {
	let record = Primitives {
		t_string: "Hello".to_owned(),
		t_int8: -8,
		t_int64: i64::MIN,
		t_uint16: 16,
		t_uint64: u64::MAX,
		t_wide: i128::MIN,
		t_float32: 0.1,
		t_float64: 1e-7,
		t_bool: true,
		t_char: 'x',
	};
	let item = encode_record(&record, &EncodeOptions::default()).expect("record encodes");

	let mut expected = Item::new();
	expected.insert("t_string".to_owned(), s("Hello"));
	expected.insert("t_int8".to_owned(), n("-8"));
	expected.insert("t_int64".to_owned(), n("-9223372036854775808"));
	expected.insert("t_uint16".to_owned(), n("16"));
	expected.insert("t_uint64".to_owned(), n("18446744073709551615"));
	expected.insert("t_wide".to_owned(), n("-170141183460469231731687303715884105728"));
	expected.insert("t_float32".to_owned(), n("0.1"));
	expected.insert("t_float64".to_owned(), n("1e-7"));
	expected.insert("t_bool".to_owned(), AttributeValue::boolean(true));
	expected.insert("t_char".to_owned(), s("x"));
	assert_eq!(item, expected);
}

#[test]
fn tagged_field_uses_override_name() {
	let record = Person {
		name: "abc".to_owned(),
		age: 5,
	};
	let item = encode_record(&record, &EncodeOptions::default()).expect("record encodes");

	let mut expected = Item::new();
	expected.insert("n".to_owned(), s("abc"));
	expected.insert("Age".to_owned(), n("5"));
	assert_eq!(item, expected);
}

#[test]
fn sequences_pick_set_variant_from_first_element() {
	let record = Collections {
		tags: texts(&["a", "b"]),
		counts: vec![3, 1, 3],
		flags: vec![true, false],
		pair: (1, 2.5),
		blocks: vec![vec![1, 2], Vec::new()],
		empty: Vec::new(),
	};
	let item = encode_record(&record, &EncodeOptions::default()).expect("record encodes");

	assert_eq!(item["Tags"], AttributeValue::string_set(texts(&["a", "b"])));
	assert_eq!(item["counts"], AttributeValue::number_set(texts(&["3", "1", "3"])));
	assert_eq!(item["flags"], AttributeValue::number_set(texts(&["1", "0"])));
	assert_eq!(item["pair"], AttributeValue::number_set(texts(&["1", "2.5"])));
	assert_eq!(item["blocks"], AttributeValue::binary_set(vec![vec![1, 2], Vec::new()]));
	assert!(!item.contains_key("empty"));
}

#[test]
fn composites_become_json_text() {
	let mut lookup = BTreeMap::new();
	lookup.insert("b".to_owned(), 2);
	lookup.insert("a".to_owned(), 1);
	let record = Composites {
		inner: Inner {
			t_int: -1234,
			t_float32: 1.75,
		},
		lookup,
		color: Color::Red,
		maybe: None,
	};
	let item = encode_record(&record, &EncodeOptions::default()).expect("record encodes");

	assert_eq!(item["inner"], s(r#"{"TInt":-1234,"TFloat32":1.75}"#));
	assert_eq!(item["lookup"], s(r#"{"a":1,"b":2}"#));
	assert_eq!(item["color"], s(r#""Red""#));
	assert!(!item.contains_key("maybe"));
}

#[test]
fn empty_strings_are_omitted() {
	let record = Person { name: String::new(), age: 0 };
	let item = encode_record(&record, &EncodeOptions::default()).expect("record encodes");

	assert!(!item.contains_key("n"));
	assert_eq!(item["Age"], n("0"));
}

#[test]
fn zero_scalars_are_omitted_only_when_asked() {
	let record = Zeros {
		count: 0,
		ratio: 0.0,
		enabled: false,
		label: "kept".to_owned(),
	};

	let full = encode_record(&record, &EncodeOptions::default()).expect("record encodes");
	assert_eq!(full.len(), 4);
	assert_eq!(full["count"], n("0"));
	assert_eq!(full["ratio"], n("0"));
	assert_eq!(full["enabled"], AttributeValue::boolean(false));

	let sparse = encode_record(&record, &EncodeOptions::sparse()).expect("record encodes");
	assert_eq!(sparse.keys().collect::<Vec<_>>(), ["label"]);
}

#[test]
fn options_and_boxes_are_dereferenced() {
	let record = Optionals {
		missing: None,
		present: Some(3),
		boxed: Box::new("inside".to_owned()),
	};
	let item = encode_record(&record, &EncodeOptions::default()).expect("record encodes");

	assert!(!item.contains_key("missing"));
	assert_eq!(item["present"], n("3"));
	assert_eq!(item["boxed"], s("inside"));
}

#[test]
fn failure_keeps_attributes_before_the_failing_field() {
	let record = Five {
		a: "first".to_owned(),
		b: 2,
		c: f64::NAN,
		d: "fourth".to_owned(),
		e: 5,
	};
	let mut item = Item::new();
	let err = encode_record_into(&record, &mut item, &EncodeOptions::default()).expect_err("nan fails");

	assert!(matches!(err, CodecError::InvalidFloat { .. }));
	assert_eq!(err.field(), Some("c"));
	assert_eq!(item.keys().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn infinite_set_element_is_rejected() {
	crate::record! {
		struct Ratios {
			values: Vec<f32>,
		}
	}

	let record = Ratios {
		values: vec![1.0, f32::INFINITY],
	};
	let err = encode_record(&record, &EncodeOptions::default()).expect_err("infinity fails");
	assert!(matches!(err, CodecError::InvalidFloat { ref field, .. } if field == "values"));
}

#[test]
fn unsupported_shapes_fail() {
	crate::record! {
		struct Nested {
			items: Vec<Inner>,
		}
	}
	crate::record! {
		struct Mixed {
			items: Vec<Option<String>>,
		}
	}
	crate::record! {
		struct Unit {
			nothing: (),
		}
	}

	let nested = Nested {
		items: vec![Inner { t_int: 1, t_float32: 1.0 }],
	};
	let err = encode_record(&nested, &EncodeOptions::default()).expect_err("struct elements fail");
	assert!(matches!(err, CodecError::ConversionNotSupported { .. }));

	let mixed = Mixed {
		items: vec![Some("a".to_owned()), None],
	};
	let err = encode_record(&mixed, &EncodeOptions::default()).expect_err("nil element fails");
	assert!(matches!(err, CodecError::ConversionNotSupported { .. }));

	let err = encode_record(&Unit { nothing: () }, &EncodeOptions::default()).expect_err("unit fails");
	assert!(matches!(err, CodecError::ConversionNotSupported { ref field, .. } if field == "nothing"));
}
