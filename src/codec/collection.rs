use serde::Serialize;
use serde::ser::{self, Impossible, Serializer};

use crate::codec::scalar::{flag_digit, format_f32, format_f64};
use crate::codec::{AttributeValue, CodecError, Result};

/// One serialized element of a sequence field, kept until the set variant is chosen.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Element {
	Text(String),
	Int(i128),
	Uint(u128),
	F32(f32),
	F64(f64),
	Bool(bool),
	Seq(Vec<Element>),
}

impl Element {
	fn kind_name(&self) -> &'static str {
		match self {
			Self::Text(_) => "string",
			Self::Int(_) => "signed integer",
			Self::Uint(_) => "unsigned integer",
			Self::F32(_) | Self::F64(_) => "float",
			Self::Bool(_) => "bool",
			Self::Seq(_) => "sequence",
		}
	}

	fn number_text(&self) -> Result<String> {
		match self {
			Self::Int(value) => Ok(value.to_string()),
			Self::Uint(value) => Ok(value.to_string()),
			Self::F32(value) => format_f32(*value),
			Self::F64(value) => format_f64(*value),
			Self::Bool(value) => Ok(flag_digit(*value).to_owned()),
			other => Err(mixed("NS", other)),
		}
	}

	// Truncating casts match the single-byte storage of binary blocks.
	fn truncate_byte(&self) -> Result<u8> {
		match self {
			Self::Int(value) => Ok(*value as u8),
			Self::Uint(value) => Ok(*value as u8),
			Self::F32(value) => Ok(*value as u8),
			Self::F64(value) => Ok(*value as u8),
			Self::Bool(value) => Ok(u8::from(*value)),
			other => Err(CodecError::not_supported(format!("{} inside a binary set block", other.kind_name()))),
		}
	}
}

fn mixed(variant: &str, element: &Element) -> CodecError {
	CodecError::not_supported(format!("{} element in {variant} collection", element.kind_name()))
}

/// Pick the set variant from the first element's kind and build it.
///
/// Returns `None` for an empty collection, which is omitted from the item.
pub(crate) fn build_set(elements: Vec<Element>) -> Result<Option<AttributeValue>> {
	let Some(first) = elements.first() else {
		return Ok(None);
	};

	let value = match first {
		Element::Text(_) => string_set(elements)?,
		Element::Seq(_) => binary_set(elements)?,
		Element::Int(_) | Element::Uint(_) | Element::F32(_) | Element::F64(_) | Element::Bool(_) => number_set(elements)?,
	};
	Ok(Some(value))
}

fn string_set(elements: Vec<Element>) -> Result<AttributeValue> {
	let items = elements
		.into_iter()
		.map(|element| match element {
			Element::Text(text) => Ok(text),
			other => Err(mixed("SS", &other)),
		})
		.collect::<Result<Vec<_>>>()?;
	Ok(AttributeValue::string_set(items))
}

fn number_set(elements: Vec<Element>) -> Result<AttributeValue> {
	let items = elements.iter().map(Element::number_text).collect::<Result<Vec<_>>>()?;
	Ok(AttributeValue::number_set(items))
}

fn binary_set(elements: Vec<Element>) -> Result<AttributeValue> {
	let mut blocks = Vec::with_capacity(elements.len());
	for element in &elements {
		let Element::Seq(inner) = element else {
			return Err(mixed("BS", element));
		};
		blocks.push(inner.iter().map(Element::truncate_byte).collect::<Result<Vec<u8>>>()?);
	}
	Ok(AttributeValue::binary_set(blocks))
}

/// Sequence collector behind a field's `serialize_seq`/`serialize_tuple`.
pub(crate) struct SetEncoder {
	elements: Vec<Element>,
}

impl SetEncoder {
	pub(crate) fn new(len: Option<usize>) -> Self {
		Self {
			elements: Vec::with_capacity(len.unwrap_or(0)),
		}
	}

	fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.elements.push(value.serialize(ElementSerializer)?);
		Ok(())
	}
}

impl ser::SerializeSeq for SetEncoder {
	type Ok = Option<AttributeValue>;
	type Error = CodecError;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.push(value)
	}

	fn end(self) -> Result<Option<AttributeValue>> {
		build_set(self.elements)
	}
}

impl ser::SerializeTuple for SetEncoder {
	type Ok = Option<AttributeValue>;
	type Error = CodecError;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.push(value)
	}

	fn end(self) -> Result<Option<AttributeValue>> {
		build_set(self.elements)
	}
}

impl ser::SerializeTupleStruct for SetEncoder {
	type Ok = Option<AttributeValue>;
	type Error = CodecError;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.push(value)
	}

	fn end(self) -> Result<Option<AttributeValue>> {
		build_set(self.elements)
	}
}

/// Collector for a nested sequence element.
pub(crate) struct InnerSeq {
	elements: Vec<Element>,
}

impl ser::SerializeSeq for InnerSeq {
	type Ok = Element;
	type Error = CodecError;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.elements.push(value.serialize(ElementSerializer)?);
		Ok(())
	}

	fn end(self) -> Result<Element> {
		Ok(Element::Seq(self.elements))
	}
}

impl ser::SerializeTuple for InnerSeq {
	type Ok = Element;
	type Error = CodecError;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		ser::SerializeSeq::serialize_element(self, value)
	}

	fn end(self) -> Result<Element> {
		Ok(Element::Seq(self.elements))
	}
}

impl ser::SerializeTupleStruct for InnerSeq {
	type Ok = Element;
	type Error = CodecError;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
		ser::SerializeSeq::serialize_element(self, value)
	}

	fn end(self) -> Result<Element> {
		Ok(Element::Seq(self.elements))
	}
}

/// Serializes one sequence element, dereferencing `Some` and newtypes once.
struct ElementSerializer;

fn unsupported_element(what: &str) -> CodecError {
	CodecError::not_supported(format!("{what} elements cannot be stored in a set"))
}

impl Serializer for ElementSerializer {
	type Ok = Element;
	type Error = CodecError;
	type SerializeSeq = InnerSeq;
	type SerializeTuple = InnerSeq;
	type SerializeTupleStruct = InnerSeq;
	type SerializeTupleVariant = Impossible<Element, CodecError>;
	type SerializeMap = Impossible<Element, CodecError>;
	type SerializeStruct = Impossible<Element, CodecError>;
	type SerializeStructVariant = Impossible<Element, CodecError>;

	fn serialize_bool(self, v: bool) -> Result<Element> {
		Ok(Element::Bool(v))
	}

	fn serialize_i8(self, v: i8) -> Result<Element> {
		Ok(Element::Int(i128::from(v)))
	}

	fn serialize_i16(self, v: i16) -> Result<Element> {
		Ok(Element::Int(i128::from(v)))
	}

	fn serialize_i32(self, v: i32) -> Result<Element> {
		Ok(Element::Int(i128::from(v)))
	}

	fn serialize_i64(self, v: i64) -> Result<Element> {
		Ok(Element::Int(i128::from(v)))
	}

	fn serialize_i128(self, v: i128) -> Result<Element> {
		Ok(Element::Int(v))
	}

	fn serialize_u8(self, v: u8) -> Result<Element> {
		Ok(Element::Uint(u128::from(v)))
	}

	fn serialize_u16(self, v: u16) -> Result<Element> {
		Ok(Element::Uint(u128::from(v)))
	}

	fn serialize_u32(self, v: u32) -> Result<Element> {
		Ok(Element::Uint(u128::from(v)))
	}

	fn serialize_u64(self, v: u64) -> Result<Element> {
		Ok(Element::Uint(u128::from(v)))
	}

	fn serialize_u128(self, v: u128) -> Result<Element> {
		Ok(Element::Uint(v))
	}

	fn serialize_f32(self, v: f32) -> Result<Element> {
		Ok(Element::F32(v))
	}

	fn serialize_f64(self, v: f64) -> Result<Element> {
		Ok(Element::F64(v))
	}

	fn serialize_char(self, v: char) -> Result<Element> {
		Ok(Element::Text(v.to_string()))
	}

	fn serialize_str(self, v: &str) -> Result<Element> {
		Ok(Element::Text(v.to_owned()))
	}

	fn serialize_bytes(self, v: &[u8]) -> Result<Element> {
		Ok(Element::Seq(v.iter().map(|byte| Element::Uint(u128::from(*byte))).collect()))
	}

	fn serialize_none(self) -> Result<Element> {
		Err(unsupported_element("nil"))
	}

	fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Element> {
		value.serialize(self)
	}

	fn serialize_unit(self) -> Result<Element> {
		Err(unsupported_element("unit"))
	}

	fn serialize_unit_struct(self, _name: &'static str) -> Result<Element> {
		Err(unsupported_element("unit"))
	}

	fn serialize_unit_variant(self, _name: &'static str, _index: u32, _variant: &'static str) -> Result<Element> {
		Err(unsupported_element("enum"))
	}

	fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Result<Element> {
		value.serialize(self)
	}

	fn serialize_newtype_variant<T: Serialize + ?Sized>(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_value: &T,
	) -> Result<Element> {
		Err(unsupported_element("enum"))
	}

	fn serialize_seq(self, len: Option<usize>) -> Result<InnerSeq> {
		Ok(InnerSeq {
			elements: Vec::with_capacity(len.unwrap_or(0)),
		})
	}

	fn serialize_tuple(self, len: usize) -> Result<InnerSeq> {
		self.serialize_seq(Some(len))
	}

	fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<InnerSeq> {
		self.serialize_seq(Some(len))
	}

	fn serialize_tuple_variant(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleVariant> {
		Err(unsupported_element("enum"))
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
		Err(unsupported_element("map"))
	}

	fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
		Err(unsupported_element("struct"))
	}

	fn serialize_struct_variant(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStructVariant> {
		Err(unsupported_element("enum"))
	}
}
