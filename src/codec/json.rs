use serde::Serialize;
use serde_json::de::StrRead;

use crate::codec::{AttributeValue, CodecError, Result};

/// Encode a composite value as one JSON text blob in `S`.
pub(crate) fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<AttributeValue> {
	serde_json::to_string(value).map(AttributeValue::string).map_err(CodecError::invalid_json)
}

/// Run `read` against a JSON deserializer over `text` and require that all input is consumed.
pub(crate) fn decode_json<'de, T>(text: &'de str, read: impl FnOnce(&mut serde_json::Deserializer<StrRead<'de>>) -> serde_json::Result<T>) -> Result<T> {
	let mut de = serde_json::Deserializer::from_str(text);
	let value = read(&mut de).map_err(CodecError::invalid_json)?;
	de.end().map_err(CodecError::invalid_json)?;
	Ok(value)
}
