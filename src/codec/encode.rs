use tracing::trace;

use crate::codec::{Item, Record, Result};

/// Behavior switches for record encoding.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
	/// Leave numeric zeros and `false` out of the item instead of emitting them.
	pub omit_zero_scalars: bool,
}

impl EncodeOptions {
	/// Preset that omits zero-valued numbers and flags.
	pub fn sparse() -> Self {
		Self { omit_zero_scalars: true }
	}
}

/// Encode every field of `record` into a new item.
pub fn encode_record<R: Record + ?Sized>(record: &R, opt: &EncodeOptions) -> Result<Item> {
	let mut item = Item::new();
	encode_record_into(record, &mut item, opt)?;
	Ok(item)
}

/// Encode `record` into `item`, field by field in declaration order.
///
/// Stops at the first failing field. Attributes produced before it stay in `item`, and
/// the error names the failing attribute.
pub fn encode_record_into<R: Record + ?Sized>(record: &R, item: &mut Item, opt: &EncodeOptions) -> Result<()> {
	for (index, descriptor) in record.descriptors().iter().enumerate() {
		let name = descriptor.export_name();
		let Some(field) = record.field(index) else {
			continue;
		};

		match field.encode_value(opt).map_err(|err| err.at_field(name))? {
			Some(value) => {
				item.insert(name.to_owned(), value);
			}
			None => trace!(attribute = name, "omitted empty field"),
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests;
