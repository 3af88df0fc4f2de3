use std::fmt::Display;

use thiserror::Error;

use crate::codec::Kind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced while encoding records into attribute maps or decoding them back.
///
/// `field` holds the export name of the attribute being converted. It is empty until the
/// record-level encoder or decoder attaches it.
#[derive(Debug, Error)]
pub enum CodecError {
	/// Decode destination was absent.
	#[error("decode target must not be nil")]
	NilTarget,
	/// Float to encode is NaN or infinite.
	#[error("invalid float {value} at attribute {field:?}")]
	InvalidFloat {
		/// Attribute export name.
		field: String,
		/// Rendered offending value.
		value: String,
	},
	/// Composite JSON serialization or deserialization failed.
	#[error("invalid json at attribute {field:?}: {reason}")]
	InvalidJson {
		/// Attribute export name.
		field: String,
		/// Underlying `serde_json` message.
		reason: String,
	},
	/// Text payload could not be parsed as the requested number or flag.
	#[error("invalid text {text:?} for {kind} at attribute {field:?}")]
	InvalidStringForNumber {
		/// Attribute export name.
		field: String,
		/// Offending payload text.
		text: String,
		/// Destination kind.
		kind: Kind,
	},
	/// Parsed number does not fit the destination width.
	#[error("numeric overflow: {text} does not fit {kind} at attribute {field:?}")]
	NumericOverflow {
		/// Attribute export name.
		field: String,
		/// Offending payload text.
		text: String,
		/// Destination kind.
		kind: Kind,
	},
	/// Source variant, destination kind, or their pairing has no mapping.
	#[error("unsupported conversion at attribute {field:?}: {detail}")]
	ConversionNotSupported {
		/// Attribute export name.
		field: String,
		/// What was attempted.
		detail: String,
	},
	/// Source variant and destination kind pairing is defined as invalid.
	#[error("invalid conversion at attribute {field:?}: {detail}")]
	InvalidConversion {
		/// Attribute export name.
		field: String,
		/// What was attempted.
		detail: String,
	},
}

impl CodecError {
	pub(crate) fn invalid_float(value: impl Display) -> Self {
		Self::InvalidFloat {
			field: String::new(),
			value: value.to_string(),
		}
	}

	pub(crate) fn invalid_json(err: serde_json::Error) -> Self {
		Self::InvalidJson {
			field: String::new(),
			reason: err.to_string(),
		}
	}

	pub(crate) fn invalid_number(text: &str, kind: Kind) -> Self {
		Self::InvalidStringForNumber {
			field: String::new(),
			text: text.to_owned(),
			kind,
		}
	}

	pub(crate) fn overflow(text: &str, kind: Kind) -> Self {
		Self::NumericOverflow {
			field: String::new(),
			text: text.to_owned(),
			kind,
		}
	}

	pub(crate) fn not_supported(detail: impl Into<String>) -> Self {
		Self::ConversionNotSupported {
			field: String::new(),
			detail: detail.into(),
		}
	}

	pub(crate) fn invalid_conversion(detail: impl Into<String>) -> Self {
		Self::InvalidConversion {
			field: String::new(),
			detail: detail.into(),
		}
	}

	/// Attach the attribute name unless an inner conversion already set one.
	pub fn at_field(mut self, name: &str) -> Self {
		match &mut self {
			Self::NilTarget => {}
			Self::InvalidFloat { field, .. }
			| Self::InvalidJson { field, .. }
			| Self::InvalidStringForNumber { field, .. }
			| Self::NumericOverflow { field, .. }
			| Self::ConversionNotSupported { field, .. }
			| Self::InvalidConversion { field, .. } => {
				if field.is_empty() {
					name.clone_into(field);
				}
			}
		}
		self
	}

	/// Attribute name recorded on the error, if any.
	pub fn field(&self) -> Option<&str> {
		match self {
			Self::NilTarget => None,
			Self::InvalidFloat { field, .. }
			| Self::InvalidJson { field, .. }
			| Self::InvalidStringForNumber { field, .. }
			| Self::NumericOverflow { field, .. }
			| Self::ConversionNotSupported { field, .. }
			| Self::InvalidConversion { field, .. } => Some(field.as_str()).filter(|name| !name.is_empty()),
		}
	}
}

impl serde::ser::Error for CodecError {
	fn custom<T: Display>(msg: T) -> Self {
		Self::invalid_conversion(msg.to_string())
	}
}

impl serde::de::Error for CodecError {
	fn custom<T: Display>(msg: T) -> Self {
		Self::invalid_conversion(msg.to_string())
	}
}
