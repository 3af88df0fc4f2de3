use tracing::{debug, trace};

use crate::codec::{CodecError, Item, Payload, Record, Result, resolve};

/// Behavior switches for record decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Fail with `InvalidFloat` on textual NaN or infinity payloads.
	pub reject_non_finite: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { reject_non_finite: true }
	}
}

impl DecodeOptions {
	/// Preset that lets textual NaN and infinity through to float fields.
	pub fn lenient() -> Self {
		Self { reject_non_finite: false }
	}
}

/// Decode `item` into the fields of `record`.
///
/// Attributes with no populated variant, and names that match no settable field, are
/// skipped. The first failing attribute aborts the call; fields decoded before it keep
/// their new values and the failing field keeps its old one.
pub fn decode_record<R: Record + ?Sized>(item: &Item, record: &mut R, opt: &DecodeOptions) -> Result<()> {
	for (name, value) in item {
		let Some(payload) = value.extract() else {
			trace!(attribute = %name, "skipped unpopulated attribute");
			continue;
		};
		let Some(field) = resolve(record, name) else {
			debug!(attribute = %name, tag = %payload.tag(), "no settable field for attribute");
			continue;
		};

		if let Payload::M(_) = payload {
			return Err(CodecError::not_supported("M cannot be decoded into a field").at_field(name));
		}
		field.decode_value(payload, opt).map_err(|err| err.at_field(name))?;
	}
	Ok(())
}

/// Like [`decode_record`], but fails with [`CodecError::NilTarget`] when `record` is absent.
pub fn decode_record_target<R: Record + ?Sized>(item: &Item, record: Option<&mut R>, opt: &DecodeOptions) -> Result<()> {
	let record = record.ok_or(CodecError::NilTarget)?;
	decode_record(item, record, opt)
}
