use std::collections::BTreeMap;
use std::fmt;

use crate::codec::AttributeValue;

/// Tag naming one alternative of the attribute-value union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantTag {
	/// Raw binary.
	B,
	/// Boolean.
	Bool,
	/// Binary set.
	Bs,
	/// Heterogeneous list.
	L,
	/// Nested map.
	M,
	/// Number.
	N,
	/// Number set.
	Ns,
	/// Null marker.
	Null,
	/// String.
	S,
	/// String set.
	Ss,
}

impl VariantTag {
	/// Extraction precedence, first populated wins.
	pub const PRECEDENCE: [VariantTag; 10] = [
		Self::B,
		Self::Bool,
		Self::Bs,
		Self::L,
		Self::M,
		Self::N,
		Self::Ns,
		Self::Null,
		Self::S,
		Self::Ss,
	];

	/// Wire member name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::B => "B",
			Self::Bool => "BOOL",
			Self::Bs => "BS",
			Self::L => "L",
			Self::M => "M",
			Self::N => "N",
			Self::Ns => "NS",
			Self::Null => "NULL",
			Self::S => "S",
			Self::Ss => "SS",
		}
	}
}

impl fmt::Display for VariantTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Borrowed payload of one populated variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
	/// `B` bytes.
	B(&'a [u8]),
	/// `BOOL` flag.
	Bool(bool),
	/// `BS` blocks.
	Bs(&'a [Vec<u8>]),
	/// `L` elements.
	L(&'a [AttributeValue]),
	/// `M` entries.
	M(&'a BTreeMap<String, AttributeValue>),
	/// `N` decimal text.
	N(&'a str),
	/// `NS` decimal texts.
	Ns(&'a [String]),
	/// `NULL` flag.
	Null(bool),
	/// `S` text.
	S(&'a str),
	/// `SS` texts.
	Ss(&'a [String]),
}

impl Payload<'_> {
	/// Tag of the variant this payload came from.
	pub fn tag(&self) -> VariantTag {
		match self {
			Self::B(_) => VariantTag::B,
			Self::Bool(_) => VariantTag::Bool,
			Self::Bs(_) => VariantTag::Bs,
			Self::L(_) => VariantTag::L,
			Self::M(_) => VariantTag::M,
			Self::N(_) => VariantTag::N,
			Self::Ns(_) => VariantTag::Ns,
			Self::Null(_) => VariantTag::Null,
			Self::S(_) => VariantTag::S,
			Self::Ss(_) => VariantTag::Ss,
		}
	}
}

impl AttributeValue {
	/// Payload for `tag` if that variant is populated.
	///
	/// Empty `BS/L/M/NS/SS` collections count as unpopulated; a present `B` block counts
	/// even when empty.
	pub fn payload(&self, tag: VariantTag) -> Option<Payload<'_>> {
		match tag {
			VariantTag::B => self.b.as_deref().map(Payload::B),
			VariantTag::Bool => self.bool.map(Payload::Bool),
			VariantTag::Bs => non_empty(self.bs.as_deref()).map(Payload::Bs),
			VariantTag::L => non_empty(self.l.as_deref()).map(Payload::L),
			VariantTag::M => self.m.as_ref().filter(|entries| !entries.is_empty()).map(Payload::M),
			VariantTag::N => self.n.as_deref().map(Payload::N),
			VariantTag::Ns => non_empty(self.ns.as_deref()).map(Payload::Ns),
			VariantTag::Null => self.null.map(Payload::Null),
			VariantTag::S => self.s.as_deref().map(Payload::S),
			VariantTag::Ss => non_empty(self.ss.as_deref()).map(Payload::Ss),
		}
	}

	/// Every populated payload, in precedence order.
	pub fn payloads(&self) -> impl Iterator<Item = Payload<'_>> + '_ {
		VariantTag::PRECEDENCE.into_iter().filter_map(|tag| self.payload(tag))
	}

	/// First populated payload by precedence, or `None` for an empty value.
	pub fn extract(&self) -> Option<Payload<'_>> {
		self.payloads().next()
	}
}

fn non_empty<T>(items: Option<&[T]>) -> Option<&[T]> {
	items.filter(|items| !items.is_empty())
}

#[cfg(test)]
mod tests;
