use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute map keyed by export name, as stored and fetched by the item store.
pub type Item = BTreeMap<String, AttributeValue>;

/// Wire attribute-value union.
///
/// Exactly one member is populated in a well-formed value. Members are declared in
/// extraction precedence order. The serde form is the store's JSON shape, with binary
/// payloads carried as standard base64.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
	/// Raw binary.
	#[serde(rename = "B", default, skip_serializing_if = "Option::is_none", with = "base64_block")]
	pub b: Option<Vec<u8>>,
	/// Boolean.
	#[serde(rename = "BOOL", default, skip_serializing_if = "Option::is_none")]
	pub bool: Option<bool>,
	/// Binary set.
	#[serde(rename = "BS", default, skip_serializing_if = "Option::is_none", with = "base64_blocks")]
	pub bs: Option<Vec<Vec<u8>>>,
	/// Heterogeneous list.
	#[serde(rename = "L", default, skip_serializing_if = "Option::is_none")]
	pub l: Option<Vec<AttributeValue>>,
	/// Nested map.
	#[serde(rename = "M", default, skip_serializing_if = "Option::is_none")]
	pub m: Option<BTreeMap<String, AttributeValue>>,
	/// Number as decimal text.
	#[serde(rename = "N", default, skip_serializing_if = "Option::is_none")]
	pub n: Option<String>,
	/// Number set as decimal text.
	#[serde(rename = "NS", default, skip_serializing_if = "Option::is_none")]
	pub ns: Option<Vec<String>>,
	/// Explicit null marker.
	#[serde(rename = "NULL", default, skip_serializing_if = "Option::is_none")]
	pub null: Option<bool>,
	/// String.
	#[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
	pub s: Option<String>,
	/// String set.
	#[serde(rename = "SS", default, skip_serializing_if = "Option::is_none")]
	pub ss: Option<Vec<String>>,
}

impl AttributeValue {
	/// `S` value.
	pub fn string(value: impl Into<String>) -> Self {
		Self {
			s: Some(value.into()),
			..Self::default()
		}
	}

	/// `N` value from decimal text.
	pub fn number(text: impl Into<String>) -> Self {
		Self {
			n: Some(text.into()),
			..Self::default()
		}
	}

	/// `B` value.
	pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
		Self {
			b: Some(bytes.into()),
			..Self::default()
		}
	}

	/// `BOOL` value.
	pub fn boolean(value: bool) -> Self {
		Self {
			bool: Some(value),
			..Self::default()
		}
	}

	/// `NULL` marker.
	pub fn null(value: bool) -> Self {
		Self {
			null: Some(value),
			..Self::default()
		}
	}

	/// `SS` value.
	pub fn string_set(items: Vec<String>) -> Self {
		Self {
			ss: Some(items),
			..Self::default()
		}
	}

	/// `NS` value.
	pub fn number_set(items: Vec<String>) -> Self {
		Self {
			ns: Some(items),
			..Self::default()
		}
	}

	/// `BS` value.
	pub fn binary_set(blocks: Vec<Vec<u8>>) -> Self {
		Self {
			bs: Some(blocks),
			..Self::default()
		}
	}

	/// `L` value.
	pub fn list(items: Vec<AttributeValue>) -> Self {
		Self {
			l: Some(items),
			..Self::default()
		}
	}

	/// `M` value.
	pub fn map(entries: BTreeMap<String, AttributeValue>) -> Self {
		Self {
			m: Some(entries),
			..Self::default()
		}
	}
}

mod base64_block {
	use base64::Engine;
	use base64::engine::general_purpose::STANDARD;
	use serde::{Deserialize, Deserializer, Serializer};

	pub(super) fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
		match value {
			Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
			None => serializer.serialize_none(),
		}
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
		let Some(text) = Option::<String>::deserialize(deserializer)? else {
			return Ok(None);
		};
		STANDARD.decode(text).map(Some).map_err(serde::de::Error::custom)
	}
}

mod base64_blocks {
	use base64::Engine;
	use base64::engine::general_purpose::STANDARD;
	use serde::{Deserialize, Deserializer, Serializer};

	pub(super) fn serialize<S: Serializer>(value: &Option<Vec<Vec<u8>>>, serializer: S) -> Result<S::Ok, S::Error> {
		match value {
			Some(blocks) => serializer.collect_seq(blocks.iter().map(|block| STANDARD.encode(block))),
			None => serializer.serialize_none(),
		}
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<Vec<u8>>>, D::Error> {
		let Some(texts) = Option::<Vec<String>>::deserialize(deserializer)? else {
			return Ok(None);
		};
		texts
			.into_iter()
			.map(|text| STANDARD.decode(text).map_err(serde::de::Error::custom))
			.collect::<Result<Vec<_>, _>>()
			.map(Some)
	}
}

#[cfg(test)]
mod tests;
