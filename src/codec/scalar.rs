use std::fmt;
use std::num::{IntErrorKind, ParseIntError};

use crate::codec::{CodecError, Result};

/// Magnitudes outside `[EXP_LOW, EXP_HIGH)` are rendered in exponent form.
const EXP_LOW: f64 = 1e-6;
const EXP_HIGH: f64 = 1e21;

/// Destination kind requested by a decode, used for width checks and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// `bool`.
	Bool,
	/// `i8`.
	I8,
	/// `i16`.
	I16,
	/// `i32`.
	I32,
	/// `i64`.
	I64,
	/// `i128`.
	I128,
	/// `u8`.
	U8,
	/// `u16`.
	U16,
	/// `u32`.
	U32,
	/// `u64`.
	U64,
	/// `u128`.
	U128,
	/// `f32`.
	F32,
	/// `f64`.
	F64,
	/// `char`.
	Char,
	/// Owned or borrowed string.
	String,
	/// Byte buffer.
	Bytes,
	/// Sequence or tuple.
	Seq,
	/// Struct, map, or enum.
	Composite,
	/// Unit value.
	Unit,
}

impl Kind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::I128 => "i128",
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::U128 => "u128",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::Char => "char",
			Self::String => "string",
			Self::Bytes => "bytes",
			Self::Seq => "sequence",
			Self::Composite => "composite",
			Self::Unit => "unit",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Parse base-10 text into a signed integer of the destination width.
pub(crate) fn parse_signed<T: TryFrom<i64>>(text: &str, kind: Kind) -> Result<T> {
	let value = text.parse::<i64>().map_err(|err| int_error(text, kind, &err))?;
	T::try_from(value).map_err(|_| CodecError::overflow(text, kind))
}

/// Parse base-10 text into an unsigned integer of the destination width.
pub(crate) fn parse_unsigned<T: TryFrom<u64>>(text: &str, kind: Kind) -> Result<T> {
	let value = text.parse::<u64>().map_err(|err| int_error(text, kind, &err))?;
	T::try_from(value).map_err(|_| CodecError::overflow(text, kind))
}

pub(crate) fn parse_i128(text: &str) -> Result<i128> {
	text.parse::<i128>().map_err(|err| int_error(text, Kind::I128, &err))
}

pub(crate) fn parse_u128(text: &str) -> Result<u128> {
	text.parse::<u128>().map_err(|err| int_error(text, Kind::U128, &err))
}

/// Parse base-10 integer text as a flag; any non-zero value is `true`.
pub(crate) fn parse_flag(text: &str) -> Result<bool> {
	text.parse::<i64>()
		.map(|value| value != 0)
		.map_err(|_| CodecError::invalid_number(text, Kind::Bool))
}

/// Parse decimal text as `f64`.
///
/// Finite text that rounds to infinity is an overflow. Literal NaN/infinity text is
/// rejected with `InvalidFloat` when `reject_non_finite` is set.
pub(crate) fn parse_f64(text: &str, reject_non_finite: bool) -> Result<f64> {
	parse_wide(text, Kind::F64, reject_non_finite)
}

/// Parse decimal text as `f32`, checking the narrower range.
pub(crate) fn parse_f32(text: &str, reject_non_finite: bool) -> Result<f32> {
	let wide = parse_wide(text, Kind::F32, reject_non_finite)?;
	if !wide.is_finite() {
		return Ok(wide as f32);
	}

	let narrow = text.parse::<f32>().map_err(|_| CodecError::invalid_number(text, Kind::F32))?;
	if narrow.is_infinite() {
		return Err(CodecError::overflow(text, Kind::F32));
	}
	Ok(narrow)
}

fn parse_wide(text: &str, kind: Kind, reject_non_finite: bool) -> Result<f64> {
	let value = text.parse::<f64>().map_err(|_| CodecError::invalid_number(text, kind))?;
	if value.is_finite() {
		return Ok(value);
	}
	if !is_non_finite_literal(text) {
		return Err(CodecError::overflow(text, kind));
	}
	if reject_non_finite {
		return Err(CodecError::invalid_float(text));
	}
	Ok(value)
}

fn is_non_finite_literal(text: &str) -> bool {
	let unsigned = text.trim_start_matches(['+', '-']);
	["nan", "inf", "infinity"].iter().any(|word| unsigned.eq_ignore_ascii_case(word))
}

fn int_error(text: &str, kind: Kind, err: &ParseIntError) -> CodecError {
	match err.kind() {
		IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CodecError::overflow(text, kind),
		_ => CodecError::invalid_number(text, kind),
	}
}

/// Shortest round-trip decimal text for an `f64`.
pub(crate) fn format_f64(value: f64) -> Result<String> {
	if !value.is_finite() {
		return Err(CodecError::invalid_float(value));
	}
	Ok(shortest(value, value.abs()))
}

/// Shortest round-trip decimal text for an `f32`, using single-precision digits.
pub(crate) fn format_f32(value: f32) -> Result<String> {
	if !value.is_finite() {
		return Err(CodecError::invalid_float(value));
	}
	Ok(shortest(value, f64::from(value).abs()))
}

fn shortest<F: fmt::Display + fmt::LowerExp>(value: F, magnitude: f64) -> String {
	if magnitude != 0.0 && !(EXP_LOW..EXP_HIGH).contains(&magnitude) {
		format!("{value:e}")
	} else {
		format!("{value}")
	}
}

/// Number-set text for a flag.
pub(crate) fn flag_digit(value: bool) -> &'static str {
	if value { "1" } else { "0" }
}

/// String text for a flag.
pub(crate) fn flag_word(value: bool) -> &'static str {
	if value { "true" } else { "false" }
}
