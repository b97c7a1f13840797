//! Host node identifiers.

use std::fmt;

/// Opaque handle to a node owned by a [`Host`](crate::Host).
///
/// Ids are only meaningful to the host that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Wraps a raw index. Hosts decide what the index means.
	pub const fn from_raw(raw: usize) -> Self {
		Self(raw)
	}

	/// Returns the raw index.
	pub const fn raw(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}
