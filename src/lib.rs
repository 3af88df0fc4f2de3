//! Typed record codec for the attribute-value representation used by wide-column item stores.

/// Attribute values, variant extraction, record field tables, and the encode/decode engine.
pub mod codec;
