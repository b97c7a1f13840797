//! Insertion points.
//!
//! An [`InsertionPoint`] names a contiguous run of children inside a parent
//! node: the half-open range `start..end`. A collapsed point (`start == end`)
//! is a position between two siblings where a node can be inserted.
//!
//! Points are plain values. Mount operations receive a point and hand back the
//! point they ended up occupying, so no caller ever sees its point rewritten
//! behind its back.

use std::fmt;
use std::ops::Range;

use crate::error::HostResult;
use crate::host::Host;
use crate::node::NodeId;

/// A span of children inside `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InsertionPoint {
	parent: NodeId,
	start: usize,
	end: usize,
}

impl InsertionPoint {
	/// Creates a point covering `start..end` of `parent`'s children.
	///
	/// `end` is clamped to be at least `start`.
	pub fn new(parent: NodeId, start: usize, end: usize) -> Self {
		Self {
			parent,
			start,
			end: end.max(start),
		}
	}

	/// A collapsed point at the very start of `node`.
	pub fn start_of(node: NodeId) -> Self {
		Self::new(node, 0, 0)
	}

	/// A point spanning the full content of `node`.
	pub fn spanning(host: &dyn Host, node: NodeId) -> HostResult<Self> {
		let len = host.child_count(node)?;
		Ok(Self::new(node, 0, len))
	}

	/// A collapsed point immediately after `sibling`.
	pub fn after(host: &dyn Host, sibling: NodeId) -> HostResult<Self> {
		let (parent, index) = host.position_of(sibling)?;
		Ok(Self::new(parent, index + 1, index + 1))
	}

	/// A collapsed point after the last child of `node`, or at its start when
	/// it has no children yet.
	pub fn end_of(host: &dyn Host, node: NodeId) -> HostResult<Self> {
		match host.last_child(node)? {
			Some(last) => Self::after(host, last),
			None => Ok(Self::start_of(node)),
		}
	}

	/// The parent whose children this point addresses.
	pub fn parent(&self) -> NodeId {
		self.parent
	}

	/// First child index covered by the point.
	pub fn start(&self) -> usize {
		self.start
	}

	/// One past the last child index covered by the point.
	pub fn end(&self) -> usize {
		self.end
	}

	/// The covered child indices.
	pub fn range(&self) -> Range<usize> {
		self.start..self.end
	}

	/// Number of children covered.
	pub fn len(&self) -> usize {
		self.end - self.start
	}

	/// Whether the point covers no children.
	pub fn is_collapsed(&self) -> bool {
		self.start == self.end
	}

	/// The collapsed point at this point's start.
	pub fn collapse(self) -> Self {
		Self::new(self.parent, self.start, self.start)
	}

	/// The point covering exactly one child at this point's start.
	pub fn single(self) -> Self {
		Self::new(self.parent, self.start, self.start + 1)
	}
}

impl fmt::Display for InsertionPoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}[{}..{}]", self.parent, self.start, self.end)
	}
}
