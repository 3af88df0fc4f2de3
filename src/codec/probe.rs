use std::fmt;

use serde::Serialize;
use serde::ser::{self, Impossible, Serializer};

/// Coarse serde shape of a value, found without serializing its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
	/// Bool, number, char, string, or byte buffer.
	Scalar,
	/// `None`.
	Absent,
	/// Unit or unit struct.
	Unit,
	/// Sequence, tuple, or tuple struct.
	Sequence,
	/// Struct, map, or enum.
	Composite,
}

/// Classify `value` by the first serializer call it makes.
pub(crate) fn shape_of<T: Serialize + ?Sized>(value: &T) -> Shape {
	match value.serialize(ShapeProbe) {
		Ok(shape) => shape,
		Err(Found(shape)) => shape,
	}
}

struct ShapeProbe;

/// Compound shapes short-circuit through the error channel.
#[derive(Debug)]
struct Found(Shape);

impl fmt::Display for Found {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "found {:?}", self.0)
	}
}

impl std::error::Error for Found {}

impl ser::Error for Found {
	// A failing `Serialize` impl is left for the real encoder to report.
	fn custom<T: fmt::Display>(_msg: T) -> Self {
		Found(Shape::Scalar)
	}
}

impl Serializer for ShapeProbe {
	type Ok = Shape;
	type Error = Found;
	type SerializeSeq = Impossible<Shape, Found>;
	type SerializeTuple = Impossible<Shape, Found>;
	type SerializeTupleStruct = Impossible<Shape, Found>;
	type SerializeTupleVariant = Impossible<Shape, Found>;
	type SerializeMap = Impossible<Shape, Found>;
	type SerializeStruct = Impossible<Shape, Found>;
	type SerializeStructVariant = Impossible<Shape, Found>;

	fn serialize_bool(self, _v: bool) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_i8(self, _v: i8) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_i16(self, _v: i16) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_i32(self, _v: i32) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_i64(self, _v: i64) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_i128(self, _v: i128) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_u8(self, _v: u8) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_u16(self, _v: u16) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_u32(self, _v: u32) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_u64(self, _v: u64) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_u128(self, _v: u128) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_f32(self, _v: f32) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_f64(self, _v: f64) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_char(self, _v: char) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_str(self, _v: &str) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_bytes(self, _v: &[u8]) -> Result<Shape, Found> {
		Ok(Shape::Scalar)
	}

	fn serialize_none(self) -> Result<Shape, Found> {
		Ok(Shape::Absent)
	}

	fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Shape, Found> {
		value.serialize(self)
	}

	fn serialize_unit(self) -> Result<Shape, Found> {
		Ok(Shape::Unit)
	}

	fn serialize_unit_struct(self, _name: &'static str) -> Result<Shape, Found> {
		Ok(Shape::Unit)
	}

	fn serialize_unit_variant(self, _name: &'static str, _index: u32, _variant: &'static str) -> Result<Shape, Found> {
		Ok(Shape::Composite)
	}

	fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Result<Shape, Found> {
		value.serialize(self)
	}

	fn serialize_newtype_variant<T: Serialize + ?Sized>(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_value: &T,
	) -> Result<Shape, Found> {
		Ok(Shape::Composite)
	}

	fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Found> {
		Err(Found(Shape::Sequence))
	}

	fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Found> {
		Err(Found(Shape::Sequence))
	}

	fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct, Found> {
		Err(Found(Shape::Sequence))
	}

	fn serialize_tuple_variant(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleVariant, Found> {
		Err(Found(Shape::Composite))
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Found> {
		Err(Found(Shape::Composite))
	}

	fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct, Found> {
		Err(Found(Shape::Composite))
	}

	fn serialize_struct_variant(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStructVariant, Found> {
		Err(Found(Shape::Composite))
	}
}
