use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned};

use crate::codec::de::PayloadDeserializer;
use crate::codec::{AttributeValue, DecodeOptions, EncodeOptions, Payload, Result, ser};

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
	/// Declared identifier.
	pub ident: &'static str,
	/// Optional attribute-name override.
	pub tag: Option<&'static str>,
}

impl FieldDescriptor {
	/// Describe a field by identifier and optional override tag.
	pub const fn new(ident: &'static str, tag: Option<&'static str>) -> Self {
		Self { ident, tag }
	}

	/// Name the field is stored under: the tag when present and non-empty, else the identifier.
	pub fn export_name(&self) -> &'static str {
		match self.tag {
			Some(tag) if !tag.is_empty() => tag,
			_ => self.ident,
		}
	}

	/// Whether an attribute named `name` belongs to this field.
	///
	/// Both the override tag and the identifier are accepted.
	pub fn matches(&self, name: &str) -> bool {
		self.ident == name || self.tag.is_some_and(|tag| !tag.is_empty() && tag == name)
	}
}

/// Converts one field value into an attribute.
pub trait EncodeValue {
	/// Encode the value. `Ok(None)` means the attribute is omitted.
	fn encode_value(&self, opt: &EncodeOptions) -> Result<Option<AttributeValue>>;
}

impl<T: Serialize + ?Sized> EncodeValue for T {
	fn encode_value(&self, opt: &EncodeOptions) -> Result<Option<AttributeValue>> {
		ser::encode_value(self, opt)
	}
}

/// Overwrites one field value from an extracted payload.
pub trait DecodeValue {
	/// Decode `payload` into `self`. On error `self` is left unchanged.
	fn decode_value(&mut self, payload: Payload<'_>, opt: &DecodeOptions) -> Result<()>;
}

impl<T: DeserializeOwned> DecodeValue for T {
	fn decode_value(&mut self, payload: Payload<'_>, opt: &DecodeOptions) -> Result<()> {
		*self = <T as Deserialize>::deserialize(PayloadDeserializer::new(payload, opt))?;
		Ok(())
	}
}

/// Field table of a typed record.
///
/// Usually implemented through [`record!`](crate::record). Index `i` of `field` and
/// `field_mut` refers to `descriptors()[i]`.
pub trait Record {
	/// Field descriptors in declaration order.
	fn descriptors(&self) -> &[FieldDescriptor];

	/// Read access to the field at `index`.
	fn field(&self, index: usize) -> Option<&dyn EncodeValue>;

	/// Settable access to the field at `index`; `None` when the field cannot be written.
	fn field_mut(&mut self, index: usize) -> Option<&mut dyn DecodeValue>;
}

impl<R: Record + ?Sized> Record for Box<R> {
	fn descriptors(&self) -> &[FieldDescriptor] {
		(**self).descriptors()
	}

	fn field(&self, index: usize) -> Option<&dyn EncodeValue> {
		(**self).field(index)
	}

	fn field_mut(&mut self, index: usize) -> Option<&mut dyn DecodeValue> {
		(**self).field_mut(index)
	}
}

impl<R: Record + ?Sized> Record for &mut R {
	fn descriptors(&self) -> &[FieldDescriptor] {
		(**self).descriptors()
	}

	fn field(&self, index: usize) -> Option<&dyn EncodeValue> {
		(**self).field(index)
	}

	fn field_mut(&mut self, index: usize) -> Option<&mut dyn DecodeValue> {
		(**self).field_mut(index)
	}
}

/// Index of the first field in declaration order whose tag or identifier equals `name`.
pub fn resolve_index(descriptors: &[FieldDescriptor], name: &str) -> Option<usize> {
	descriptors.iter().position(|descriptor| descriptor.matches(name))
}

/// Settable field for attribute `name`, or `None` when it is unknown or read-only.
pub fn resolve<'r, R: Record + ?Sized>(record: &'r mut R, name: &str) -> Option<&'r mut dyn DecodeValue> {
	let index = resolve_index(record.descriptors(), name)?;
	record.field_mut(index)
}

/// Declare a struct and implement [`Record`](crate::codec::Record) for it.
///
/// Each field may carry doc comments and one `#[attr = "name"]` override. Every field
/// type must implement both `Serialize` and `DeserializeOwned`.
///
/// ```
/// itemcodec::record! {
///     #[derive(Debug, Default)]
///     pub struct User {
///         #[attr = "n"]
///         pub name: String,
///         pub age: u32,
///     }
/// }
///
/// let item = itemcodec::codec::encode_record(
///     &User { name: "abc".to_owned(), age: 5 },
///     &Default::default(),
/// )
/// .unwrap();
/// assert_eq!(item["n"].s.as_deref(), Some("abc"));
/// assert_eq!(item["age"].n.as_deref(), Some("5"));
/// ```
#[macro_export]
macro_rules! record {
	(@tag) => {
		::core::option::Option::None
	};
	(@tag $tag:literal) => {
		::core::option::Option::Some($tag)
	};
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[doc = $doc:literal])*
				$(#[attr = $tag:literal])?
				$fvis:vis $field:ident : $ty:ty
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[doc = $doc])*
				$fvis $field: $ty,
			)*
		}

		impl $crate::codec::Record for $name {
			fn descriptors(&self) -> &[$crate::codec::FieldDescriptor] {
				const DESCRIPTORS: &[$crate::codec::FieldDescriptor] = &[
					$($crate::codec::FieldDescriptor::new(stringify!($field), $crate::record!(@tag $($tag)?)),)*
				];
				DESCRIPTORS
			}

			#[allow(unused_mut, unused_variables, unused_assignments)]
			fn field(&self, index: usize) -> ::core::option::Option<&dyn $crate::codec::EncodeValue> {
				let mut slot = 0usize;
				$(
					if index == slot {
						let value: &dyn $crate::codec::EncodeValue = &self.$field;
						return ::core::option::Option::Some(value);
					}
					slot += 1;
				)*
				::core::option::Option::None
			}

			#[allow(unused_mut, unused_variables, unused_assignments)]
			fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn $crate::codec::DecodeValue> {
				let mut slot = 0usize;
				$(
					if index == slot {
						let value: &mut dyn $crate::codec::DecodeValue = &mut self.$field;
						return ::core::option::Option::Some(value);
					}
					slot += 1;
				)*
				::core::option::Option::None
			}
		}
	};
}

#[cfg(test)]
mod tests;
