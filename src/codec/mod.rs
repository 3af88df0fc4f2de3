mod collection;
mod de;
mod decode;
mod encode;
mod error;
mod json;
mod probe;
mod record;
mod scalar;
mod ser;
mod value;
mod variant;

/// Record decoding entry points and options.
pub use decode::{DecodeOptions, decode_record, decode_record_target};
/// Record encoding entry points and options.
pub use encode::{EncodeOptions, encode_record, encode_record_into};
/// Error and result aliases.
pub use error::{CodecError, Result};
/// Record field tables and per-field conversion traits.
pub use record::{DecodeValue, EncodeValue, FieldDescriptor, Record, resolve, resolve_index};
/// Destination kinds named in diagnostics.
pub use scalar::Kind;
/// Attribute-value union and item map.
pub use value::{AttributeValue, Item};
/// Variant tags and extracted payloads.
pub use variant::{Payload, VariantTag};
