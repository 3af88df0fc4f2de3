use crate::codec::{AttributeValue, CodecError, DecodeOptions, DecodeValue, FieldDescriptor, Payload, Record, resolve, resolve_index};

crate::record! {
	#[derive(Debug, Default, PartialEq)]
	struct Tagged {
		/// Stored under its override.
		#[attr = "untag1"]
		tag1: String,
		#[attr = ""]
		tag2: i32,
		plain: bool,
	}
}

#[test]
fn macro_builds_descriptors_in_declaration_order() {
	let record = Tagged::default();
	let descriptors = record.descriptors();
	assert_eq!(
		descriptors,
		&[
			FieldDescriptor::new("tag1", Some("untag1")),
			FieldDescriptor::new("tag2", Some("")),
			FieldDescriptor::new("plain", None),
		]
	);

	let names: Vec<_> = descriptors.iter().map(FieldDescriptor::export_name).collect();
	assert_eq!(names, ["untag1", "tag2", "plain"]);
}

#[test]
fn tag_and_identifier_both_resolve() {
	let record = Tagged::default();
	assert_eq!(resolve_index(record.descriptors(), "untag1"), Some(0));
	assert_eq!(resolve_index(record.descriptors(), "tag1"), Some(0));
	assert_eq!(resolve_index(record.descriptors(), "tag2"), Some(1));
	assert_eq!(resolve_index(record.descriptors(), ""), None);
	assert_eq!(resolve_index(record.descriptors(), "missing"), None);
}

#[test]
fn first_match_in_declaration_order_wins() {
	let descriptors = [FieldDescriptor::new("a", Some("b")), FieldDescriptor::new("b", None)];
	assert_eq!(resolve_index(&descriptors, "b"), Some(0));
	assert_eq!(resolve_index(&descriptors, "a"), Some(0));
}

#[test]
fn field_access_is_bounded_by_the_table() {
	let mut record = Tagged::default();
	assert!(record.field(2).is_some());
	assert!(record.field(3).is_none());
	assert!(record.field_mut(3).is_none());
}

#[test]
fn resolved_field_is_written_in_place() {
	let mut record = Tagged::default();
	let opt = DecodeOptions::default();

	let field = resolve(&mut record, "untag1").expect("tag resolves");
	field.decode_value(Payload::S("value"), &opt).expect("string decodes");
	let field = resolve(&mut record, "plain").expect("ident resolves");
	field.decode_value(Payload::Bool(true), &opt).expect("bool decodes");

	assert_eq!(record.tag1, "value");
	assert!(record.plain);
	assert!(resolve(&mut record, "unknown").is_none());
}

#[test]
fn failed_decode_leaves_field_unchanged() {
	let mut value = 7_i8;
	let err = value.decode_value(Payload::N("300"), &DecodeOptions::default()).expect_err("overflow");
	assert!(matches!(err, CodecError::NumericOverflow { .. }));
	assert_eq!(value, 7);
}

#[test]
fn boxed_and_borrowed_records_delegate() {
	let mut boxed = Box::new(Tagged::default());
	assert_eq!(boxed.descriptors().len(), 3);
	resolve(&mut boxed, "tag2")
		.expect("boxed field resolves")
		.decode_value(Payload::N("12"), &DecodeOptions::default())
		.expect("number decodes");
	assert_eq!(boxed.tag2, 12);

	let mut inner = Tagged::default();
	let mut borrowed = &mut inner;
	let encoded = borrowed.field(0).expect("field exists").encode_value(&Default::default()).expect("encodes");
	assert_eq!(encoded, None);
	resolve(&mut borrowed, "tag1")
		.expect("borrowed field resolves")
		.decode_value(Payload::S("x"), &DecodeOptions::default())
		.expect("string decodes");
	assert_eq!(inner.tag1, "x");
	assert_eq!(AttributeValue::string("x").extract(), Some(Payload::S("x")));
}
