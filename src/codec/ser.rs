use serde::Serialize;
use serde::ser::{Impossible, Serializer};

use crate::codec::collection::SetEncoder;
use crate::codec::probe::{Shape, shape_of};
use crate::codec::scalar::{format_f32, format_f64};
use crate::codec::{AttributeValue, CodecError, EncodeOptions, Result, json};

/// Encode one field value; `None` means the attribute is omitted.
pub(crate) fn encode_value<T: Serialize + ?Sized>(value: &T, opt: &EncodeOptions) -> Result<Option<AttributeValue>> {
	match shape_of(value) {
		Shape::Composite => json::encode_json(value).map(Some),
		Shape::Absent => Ok(None),
		Shape::Scalar | Shape::Sequence | Shape::Unit => value.serialize(ValueSerializer { opt }),
	}
}

struct ValueSerializer<'o> {
	opt: &'o EncodeOptions,
}

impl ValueSerializer<'_> {
	fn number(&self, is_zero: bool, text: String) -> Result<Option<AttributeValue>> {
		if is_zero && self.opt.omit_zero_scalars {
			return Ok(None);
		}
		Ok(Some(AttributeValue::number(text)))
	}
}

fn composite_reached() -> CodecError {
	CodecError::not_supported("composite value outside the json fallback")
}

impl Serializer for ValueSerializer<'_> {
	type Ok = Option<AttributeValue>;
	type Error = CodecError;
	type SerializeSeq = SetEncoder;
	type SerializeTuple = SetEncoder;
	type SerializeTupleStruct = SetEncoder;
	type SerializeTupleVariant = Impossible<Option<AttributeValue>, CodecError>;
	type SerializeMap = Impossible<Option<AttributeValue>, CodecError>;
	type SerializeStruct = Impossible<Option<AttributeValue>, CodecError>;
	type SerializeStructVariant = Impossible<Option<AttributeValue>, CodecError>;

	fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
		if !v && self.opt.omit_zero_scalars {
			return Ok(None);
		}
		Ok(Some(AttributeValue::boolean(v)))
	}

	fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
		self.number(v == 0, v.to_string())
	}

	fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
		let text = format_f32(v)?;
		self.number(v == 0.0, text)
	}

	fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
		let text = format_f64(v)?;
		self.number(v == 0.0, text)
	}

	fn serialize_char(self, v: char) -> Result<Self::Ok> {
		Ok(Some(AttributeValue::string(v.to_string())))
	}

	// The store rejects empty strings.
	fn serialize_str(self, v: &str) -> Result<Self::Ok> {
		if v.is_empty() {
			return Ok(None);
		}
		Ok(Some(AttributeValue::string(v)))
	}

	fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
		if v.is_empty() {
			return Ok(None);
		}
		Ok(Some(AttributeValue::binary(v)))
	}

	fn serialize_none(self) -> Result<Self::Ok> {
		Ok(None)
	}

	fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Self::Ok> {
		encode_value(value, self.opt)
	}

	fn serialize_unit(self) -> Result<Self::Ok> {
		Err(CodecError::not_supported("unit values have no attribute form"))
	}

	fn serialize_unit_struct(self, name: &'static str) -> Result<Self::Ok> {
		Err(CodecError::not_supported(format!("unit struct {name} has no attribute form")))
	}

	fn serialize_unit_variant(self, _name: &'static str, _index: u32, _variant: &'static str) -> Result<Self::Ok> {
		Err(composite_reached())
	}

	fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Result<Self::Ok> {
		encode_value(value, self.opt)
	}

	fn serialize_newtype_variant<T: Serialize + ?Sized>(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_value: &T,
	) -> Result<Self::Ok> {
		Err(composite_reached())
	}

	fn serialize_seq(self, len: Option<usize>) -> Result<SetEncoder> {
		Ok(SetEncoder::new(len))
	}

	fn serialize_tuple(self, len: usize) -> Result<SetEncoder> {
		Ok(SetEncoder::new(Some(len)))
	}

	fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SetEncoder> {
		Ok(SetEncoder::new(Some(len)))
	}

	fn serialize_tuple_variant(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleVariant> {
		Err(composite_reached())
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
		Err(composite_reached())
	}

	fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
		Err(composite_reached())
	}

	fn serialize_struct_variant(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStructVariant> {
		Err(composite_reached())
	}
}
