use std::slice;

use serde::de::value::SeqDeserializer;
use serde::de::{self, DeserializeSeed, SeqAccess, Visitor};
use serde::forward_to_deserialize_any;

use crate::codec::scalar::{flag_word, parse_f32, parse_f64, parse_flag, parse_i128, parse_signed, parse_u128, parse_unsigned};
use crate::codec::{AttributeValue, CodecError, DecodeOptions, Kind, Payload, Result, json};

/// Where a payload sits, which narrows the destination kinds it may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
	/// A top-level attribute or an `L` element.
	Attribute,
	/// One text entry of an `SS` or `NS` set; only strings and numbers are accepted.
	SetElement,
}

/// Deserializes one extracted payload into whatever kind the destination asks for.
pub(crate) struct PayloadDeserializer<'de, 'o> {
	payload: Payload<'de>,
	opt: &'o DecodeOptions,
	scope: Scope,
}

impl<'de, 'o> PayloadDeserializer<'de, 'o> {
	pub(crate) fn new(payload: Payload<'de>, opt: &'o DecodeOptions) -> Self {
		Self {
			payload,
			opt,
			scope: Scope::Attribute,
		}
	}

	fn mismatch(&self, kind: Kind) -> CodecError {
		let tag = self.payload.tag();
		let detail = match self.scope {
			Scope::Attribute => format!("{tag} into {kind}"),
			Scope::SetElement => format!("set element into {kind}"),
		};
		match self.payload {
			Payload::Bs(_) | Payload::M(_) => CodecError::not_supported(detail),
			_ => CodecError::invalid_conversion(detail),
		}
	}

	fn reject_in_set(&self, kind: Kind) -> Result<()> {
		match self.scope {
			Scope::Attribute => Ok(()),
			Scope::SetElement => Err(self.mismatch(kind)),
		}
	}

	fn signed<T: TryFrom<i64>>(&self, kind: Kind) -> Result<T> {
		match self.payload {
			Payload::S(text) | Payload::N(text) => parse_signed(text, kind),
			Payload::Bool(flag) | Payload::Null(flag) => T::try_from(i64::from(flag)).map_err(|_| self.mismatch(kind)),
			_ => Err(self.mismatch(kind)),
		}
	}

	fn unsigned<T: TryFrom<u64>>(&self, kind: Kind) -> Result<T> {
		match self.payload {
			Payload::S(text) | Payload::N(text) => parse_unsigned(text, kind),
			Payload::Bool(flag) | Payload::Null(flag) => T::try_from(u64::from(flag)).map_err(|_| self.mismatch(kind)),
			_ => Err(self.mismatch(kind)),
		}
	}

	fn float32(&self) -> Result<f32> {
		match self.payload {
			Payload::S(text) | Payload::N(text) => parse_f32(text, self.opt.reject_non_finite),
			Payload::Bool(flag) | Payload::Null(flag) => Ok(f32::from(u8::from(flag))),
			_ => Err(self.mismatch(Kind::F32)),
		}
	}

	fn float64(&self) -> Result<f64> {
		match self.payload {
			Payload::S(text) | Payload::N(text) => parse_f64(text, self.opt.reject_non_finite),
			Payload::Bool(flag) | Payload::Null(flag) => Ok(f64::from(u8::from(flag))),
			_ => Err(self.mismatch(Kind::F64)),
		}
	}
}

fn visit_number<'de, V: Visitor<'de>>(text: &str, opt: &DecodeOptions, visitor: V) -> Result<V::Value> {
	if let Ok(value) = text.parse::<i64>() {
		return visitor.visit_i64(value);
	}
	if let Ok(value) = text.parse::<u64>() {
		return visitor.visit_u64(value);
	}
	visitor.visit_f64(parse_f64(text, opt.reject_non_finite)?)
}

/// Whether `S` text is a JSON object or array, as written for composite fields.
fn holds_composite(text: &str) -> bool {
	text.trim_start().starts_with(['{', '[']) && serde_json::from_str::<de::IgnoredAny>(text).is_ok()
}

/// Visit `seq` and fail when the destination stops before the source runs out.
fn visit_whole<'de, V: Visitor<'de>, A: SeqAccess<'de, Error = CodecError>>(visitor: V, mut seq: A) -> Result<V::Value> {
	let value = visitor.visit_seq(&mut seq)?;
	match seq.size_hint() {
		Some(0) | None => Ok(value),
		Some(left) => Err(CodecError::invalid_conversion(format!("{left} elements left over after filling a fixed-length destination"))),
	}
}

impl<'de> de::Deserializer<'de> for PayloadDeserializer<'de, '_> {
	type Error = CodecError;

	fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		match self.payload {
			Payload::S(text) if holds_composite(text) => json::decode_json(text, |reader| de::Deserializer::deserialize_any(reader, visitor)),
			Payload::S(text) => visitor.visit_borrowed_str(text),
			Payload::N(text) => visit_number(text, self.opt, visitor),
			Payload::Bool(flag) => visitor.visit_bool(flag),
			Payload::Null(_) => visitor.visit_unit(),
			Payload::B(bytes) => visitor.visit_borrowed_bytes(bytes),
			Payload::Ss(_) | Payload::Ns(_) | Payload::L(_) | Payload::Bs(_) => de::Deserializer::deserialize_seq(self, visitor),
			Payload::M(_) => Err(self.mismatch(Kind::Composite)),
		}
	}

	fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.reject_in_set(Kind::Bool)?;
		match self.payload {
			Payload::S(text) | Payload::N(text) => visitor.visit_bool(parse_flag(text)?),
			Payload::Bool(flag) | Payload::Null(flag) => visitor.visit_bool(flag),
			_ => Err(self.mismatch(Kind::Bool)),
		}
	}

	fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_i8(self.signed(Kind::I8)?)
	}

	fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_i16(self.signed(Kind::I16)?)
	}

	fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_i32(self.signed(Kind::I32)?)
	}

	fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_i64(self.signed(Kind::I64)?)
	}

	fn deserialize_i128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		match self.payload {
			Payload::S(text) | Payload::N(text) => visitor.visit_i128(parse_i128(text)?),
			Payload::Bool(flag) | Payload::Null(flag) => visitor.visit_i128(i128::from(flag)),
			_ => Err(self.mismatch(Kind::I128)),
		}
	}

	fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_u8(self.unsigned(Kind::U8)?)
	}

	fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_u16(self.unsigned(Kind::U16)?)
	}

	fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_u32(self.unsigned(Kind::U32)?)
	}

	fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_u64(self.unsigned(Kind::U64)?)
	}

	fn deserialize_u128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		match self.payload {
			Payload::S(text) | Payload::N(text) => visitor.visit_u128(parse_u128(text)?),
			Payload::Bool(flag) | Payload::Null(flag) => visitor.visit_u128(u128::from(flag)),
			_ => Err(self.mismatch(Kind::U128)),
		}
	}

	fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_f32(self.float32()?)
	}

	fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_f64(self.float64()?)
	}

	fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		if let Payload::S(text) | Payload::N(text) = self.payload {
			let mut chars = text.chars();
			if let (Some(ch), None) = (chars.next(), chars.next()) {
				return visitor.visit_char(ch);
			}
		}
		Err(self.mismatch(Kind::Char))
	}

	fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		match self.payload {
			Payload::S(text) | Payload::N(text) => visitor.visit_borrowed_str(text),
			Payload::Bool(flag) | Payload::Null(flag) => visitor.visit_borrowed_str(flag_word(flag)),
			Payload::B(bytes) => match std::str::from_utf8(bytes) {
				Ok(text) => visitor.visit_borrowed_str(text),
				Err(_) => Err(CodecError::invalid_conversion("B is not valid UTF-8 text")),
			},
			_ => Err(self.mismatch(Kind::String)),
		}
	}

	fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.deserialize_str(visitor)
	}

	fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.reject_in_set(Kind::Bytes)?;
		match self.payload {
			Payload::B(bytes) => visitor.visit_borrowed_bytes(bytes),
			Payload::S(text) | Payload::N(text) => json::decode_json(text, |reader| de::Deserializer::deserialize_byte_buf(reader, visitor)),
			_ => Err(self.mismatch(Kind::Bytes)),
		}
	}

	fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.deserialize_bytes(visitor)
	}

	fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		match self.payload {
			Payload::Null(true) => visitor.visit_none(),
			_ => visitor.visit_some(self),
		}
	}

	fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		match self.payload {
			Payload::Null(_) => visitor.visit_unit(),
			_ => Err(self.mismatch(Kind::Unit)),
		}
	}

	fn deserialize_unit_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
		self.deserialize_unit(visitor)
	}

	fn deserialize_newtype_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
		visitor.visit_newtype_struct(self)
	}

	fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.reject_in_set(Kind::Seq)?;
		match self.payload {
			Payload::B(bytes) => visit_whole(visitor, SeqDeserializer::<_, CodecError>::new(bytes.iter().copied())),
			Payload::S(text) | Payload::N(text) => json::decode_json(text, |reader| de::Deserializer::deserialize_seq(reader, visitor)),
			Payload::Ss(items) => visit_whole(
				visitor,
				TextSeq {
					items: items.iter(),
					numeric: false,
					opt: self.opt,
				},
			),
			Payload::Ns(items) => visit_whole(
				visitor,
				TextSeq {
					items: items.iter(),
					numeric: true,
					opt: self.opt,
				},
			),
			Payload::L(items) => visit_whole(
				visitor,
				ListSeq {
					items: items.iter(),
					opt: self.opt,
				},
			),
			Payload::Bs(blocks) => visit_whole(visitor, BlockSeq { blocks: blocks.iter() }),
			Payload::Bool(_) | Payload::Null(_) | Payload::M(_) => Err(self.mismatch(Kind::Seq)),
		}
	}

	fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
		de::Deserializer::deserialize_seq(self, visitor)
	}

	fn deserialize_tuple_struct<V: Visitor<'de>>(self, _name: &'static str, _len: usize, visitor: V) -> Result<V::Value> {
		de::Deserializer::deserialize_seq(self, visitor)
	}

	fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.reject_in_set(Kind::Composite)?;
		match self.payload {
			Payload::S(text) | Payload::N(text) => json::decode_json(text, |reader| de::Deserializer::deserialize_map(reader, visitor)),
			_ => Err(self.mismatch(Kind::Composite)),
		}
	}

	fn deserialize_struct<V: Visitor<'de>>(self, name: &'static str, fields: &'static [&'static str], visitor: V) -> Result<V::Value> {
		self.reject_in_set(Kind::Composite)?;
		match self.payload {
			Payload::S(text) | Payload::N(text) => json::decode_json(text, |reader| de::Deserializer::deserialize_struct(reader, name, fields, visitor)),
			_ => Err(self.mismatch(Kind::Composite)),
		}
	}

	fn deserialize_enum<V: Visitor<'de>>(self, name: &'static str, variants: &'static [&'static str], visitor: V) -> Result<V::Value> {
		self.reject_in_set(Kind::Composite)?;
		match self.payload {
			Payload::S(text) | Payload::N(text) => json::decode_json(text, |reader| de::Deserializer::deserialize_enum(reader, name, variants, visitor)),
			_ => Err(self.mismatch(Kind::Composite)),
		}
	}

	fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		self.deserialize_str(visitor)
	}

	fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_unit()
	}
}

/// Elements of an `SS` or `NS` set.
struct TextSeq<'de, 'o> {
	items: slice::Iter<'de, String>,
	numeric: bool,
	opt: &'o DecodeOptions,
}

impl<'de> SeqAccess<'de> for TextSeq<'de, '_> {
	type Error = CodecError;

	fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
		let Some(text) = self.items.next() else {
			return Ok(None);
		};
		let payload = if self.numeric { Payload::N(text.as_str()) } else { Payload::S(text.as_str()) };
		let element = PayloadDeserializer {
			payload,
			opt: self.opt,
			scope: Scope::SetElement,
		};
		seed.deserialize(element).map(Some)
	}

	fn size_hint(&self) -> Option<usize> {
		Some(self.items.len())
	}
}

/// Elements of an `L` list, each extracted and coerced one level deep.
struct ListSeq<'de, 'o> {
	items: slice::Iter<'de, AttributeValue>,
	opt: &'o DecodeOptions,
}

impl<'de> SeqAccess<'de> for ListSeq<'de, '_> {
	type Error = CodecError;

	fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
		let Some(value) = self.items.next() else {
			return Ok(None);
		};
		let payload = match value.extract() {
			Some(Payload::L(_) | Payload::M(_)) => {
				return Err(CodecError::not_supported("nested list or map inside a list"));
			}
			Some(payload) => payload,
			None => Payload::Null(true),
		};
		seed.deserialize(PayloadDeserializer::new(payload, self.opt)).map(Some)
	}

	fn size_hint(&self) -> Option<usize> {
		Some(self.items.len())
	}
}

/// Blocks of a `BS` set.
struct BlockSeq<'de> {
	blocks: slice::Iter<'de, Vec<u8>>,
}

impl<'de> SeqAccess<'de> for BlockSeq<'de> {
	type Error = CodecError;

	fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
		match self.blocks.next() {
			Some(block) => seed.deserialize(BlockDeserializer { block }).map(Some),
			None => Ok(None),
		}
	}

	fn size_hint(&self) -> Option<usize> {
		Some(self.blocks.len())
	}
}

/// One binary block; only byte-sequence destinations are accepted.
struct BlockDeserializer<'de> {
	block: &'de [u8],
}

impl<'de> de::Deserializer<'de> for BlockDeserializer<'de> {
	type Error = CodecError;

	fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
		Err(CodecError::not_supported("BS into a destination other than a sequence of byte blocks"))
	}

	fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visit_whole(visitor, SeqDeserializer::<_, CodecError>::new(self.block.iter().copied()))
	}

	fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
		de::Deserializer::deserialize_seq(self, visitor)
	}

	fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_borrowed_bytes(self.block)
	}

	fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_borrowed_bytes(self.block)
	}

	fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
		visitor.visit_some(self)
	}

	fn deserialize_newtype_struct<V: Visitor<'de>>(self, _name: &'static str, visitor: V) -> Result<V::Value> {
		visitor.visit_newtype_struct(self)
	}

	forward_to_deserialize_any! {
		bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
		unit unit_struct tuple_struct map struct enum identifier ignored_any
	}
}
