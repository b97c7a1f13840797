//! Host error types.

use thiserror::Error;

use crate::node::NodeId;
use crate::point::InsertionPoint;

/// Result type for host tree operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors raised by a [`Host`](crate::Host) implementation.
///
/// The renderer never retries or recovers from these; they propagate unchanged
/// to whoever started the mount, update or state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HostError {
	/// The node id does not belong to this host.
	#[error("node not found: {0}")]
	NodeNotFound(NodeId),

	/// An element-only operation was applied to a text node.
	#[error("node {0} is not an element")]
	NotAnElement(NodeId),

	/// The point does not describe a child range of its parent.
	#[error("invalid insertion point {point}: parent has {len} children")]
	InvalidPoint {
		/// The offending point.
		point: InsertionPoint,
		/// Number of children the parent actually has.
		len: usize,
	},

	/// Insertion requires a collapsed point; clear it first.
	#[error("insertion point {0} still spans content")]
	PointNotCleared(InsertionPoint),

	/// The node is already attached to a parent.
	#[error("node {0} is already attached")]
	AlreadyAttached(NodeId),

	/// The node has no parent, so no sibling-relative point exists.
	#[error("node {0} is detached")]
	Detached(NodeId),
}
