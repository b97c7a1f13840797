//! Host events and listeners.

use std::fmt;
use std::rc::Rc;

use crate::node::NodeId;

/// Shared listener callback.
///
/// Listeners are `Rc` because hosts hand out clones during dispatch and must
/// not hold any borrow of themselves while a listener runs.
pub type EventHandler = Rc<dyn Fn(&Event)>;

/// An event delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
	kind: String,
	target: NodeId,
}

impl Event {
	/// Creates an event of `kind` targeted at `target`.
	pub fn new(kind: impl Into<String>, target: NodeId) -> Self {
		Self {
			kind: kind.into(),
			target,
		}
	}

	/// The event name, e.g. `"click"`.
	pub fn kind(&self) -> &str {
		&self.kind
	}

	/// The node the event was dispatched on.
	pub fn target(&self) -> NodeId {
		self.target
	}
}

/// A listener registered on a host node.
#[derive(Clone)]
pub struct Listener {
	/// The event name the listener reacts to.
	pub event: String,
	/// The callback.
	pub handler: EventHandler,
}

impl Listener {
	/// Creates a listener for `event`.
	pub fn new(event: impl Into<String>, handler: EventHandler) -> Self {
		Self {
			event: event.into(),
			handler,
		}
	}
}

impl fmt::Debug for Listener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Listener")
			.field("event", &self.event)
			.finish_non_exhaustive()
	}
}
