use std::collections::BTreeMap;

use crate::codec::{AttributeValue, Item};

#[test]
fn wire_json_uses_store_member_names() {
	let mut item = Item::new();
	item.insert("n".to_owned(), AttributeValue::string("abc"));
	item.insert("Age".to_owned(), AttributeValue::number("5"));
	item.insert("Flag".to_owned(), AttributeValue::boolean(true));

	let json = serde_json::to_value(&item).expect("item serializes");
	assert_eq!(json["n"], serde_json::json!({ "S": "abc" }));
	assert_eq!(json["Age"], serde_json::json!({ "N": "5" }));
	assert_eq!(json["Flag"], serde_json::json!({ "BOOL": true }));
}

#[test]
fn wire_json_carries_binary_as_base64() {
	let value = AttributeValue::binary(b"ByteByte".to_vec());
	let json = serde_json::to_string(&value).expect("value serializes");
	assert_eq!(json, r#"{"B":"Qnl0ZUJ5dGU="}"#);

	let set = AttributeValue::binary_set(vec![vec![1, 2], vec![255]]);
	let json = serde_json::to_string(&set).expect("set serializes");
	assert_eq!(json, r#"{"BS":["AQI=","/w=="]}"#);

	let back: AttributeValue = serde_json::from_str(&json).expect("set deserializes");
	assert_eq!(back, set);
}

#[test]
fn wire_json_reads_nested_lists_and_maps() {
	let json = r#"{
		"L": [{ "S": "a" }, { "N": "1" }],
		"M": { "inner": { "NULL": true } }
	}"#;
	let value: AttributeValue = serde_json::from_str(json).expect("value deserializes");

	assert_eq!(value.l, Some(vec![AttributeValue::string("a"), AttributeValue::number("1")]));
	let mut inner = BTreeMap::new();
	inner.insert("inner".to_owned(), AttributeValue::null(true));
	assert_eq!(value.m, Some(inner));
	assert_eq!(value.s, None);
}

#[test]
fn wire_json_rejects_bad_base64() {
	let err = serde_json::from_str::<AttributeValue>(r#"{"B":"***"}"#).expect_err("invalid base64 must fail");
	assert!(err.is_data(), "expected data error, got {err}");
}
