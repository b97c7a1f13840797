//! Event callbacks.
//!
//! A [`Callback`] wraps an event handler together with a *source identity*:
//! the type of the closure it was built from. Two callbacks built from the
//! same closure expression compare equal even when they capture different
//! values, so re-rendering a tree with a fresh but identical handler does not
//! count as a prop change.
//!
//! ## Example
//!
//! ```
//! use sapling_vdom::Callback;
//!
//! fn handler(tag: &'static str) -> Callback {
//!     Callback::new(move |_event| println!("{tag} clicked"))
//! }
//!
//! assert_eq!(handler("a"), handler("b"));
//! assert_ne!(handler("a"), Callback::new(|_event| {}));
//! ```

use std::any::{TypeId, type_name};
use std::fmt;
use std::rc::Rc;

use sapling_dom::{Event, EventHandler};

/// A cloneable event handler with a source identity.
#[derive(Clone)]
pub struct Callback {
	identity: TypeId,
	label: &'static str,
	inner: EventHandler,
}

impl Callback {
	/// Creates a callback from a closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		Self::keyed::<F>(Rc::new(f))
	}

	/// Creates a callback whose identity is taken from `K` instead of the
	/// wrapped handler.
	pub(crate) fn keyed<K: 'static>(inner: EventHandler) -> Self {
		Self {
			identity: TypeId::of::<K>(),
			label: type_name::<K>(),
			inner,
		}
	}

	/// Invokes the callback.
	pub fn call(&self, event: &Event) {
		(self.inner)(event)
	}

	/// The handler in the form hosts accept.
	pub fn handler(&self) -> EventHandler {
		self.inner.clone()
	}

	/// Whether both callbacks come from the same closure.
	pub fn same_source(&self, other: &Self) -> bool {
		self.identity == other.identity
	}

	/// Type name of the closure, for diagnostics.
	pub fn label(&self) -> &'static str {
		self.label
	}
}

impl PartialEq for Callback {
	fn eq(&self, other: &Self) -> bool {
		self.same_source(other)
	}
}

impl fmt::Debug for Callback {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callback")
			.field("label", &self.label)
			.finish_non_exhaustive()
	}
}

impl<F> From<F> for Callback
where
	F: Fn(&Event) + 'static,
{
	fn from(f: F) -> Self {
		Self::new(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use sapling_dom::NodeId;
	use std::cell::Cell;

	fn counting(counter: Rc<Cell<u32>>) -> Callback {
		Callback::new(move |_event| counter.set(counter.get() + 1))
	}

	#[rstest]
	fn test_call_invokes_closure() {
		let hits = Rc::new(Cell::new(0));
		let callback = counting(hits.clone());
		callback.call(&Event::new("click", NodeId::from_raw(0)));
		callback.handler()(&Event::new("click", NodeId::from_raw(0)));
		assert_eq!(hits.get(), 2);
	}

	#[rstest]
	fn test_same_closure_same_source() {
		let a = counting(Rc::new(Cell::new(0)));
		let b = counting(Rc::new(Cell::new(10)));
		assert!(a.same_source(&b));
		assert_eq!(a, b);
	}

	#[rstest]
	fn test_different_closures_differ() {
		let a = Callback::new(|_event| {});
		let b = Callback::new(|_event| {});
		assert_ne!(a, b);
	}

	#[rstest]
	fn test_clone_keeps_identity() {
		let a = counting(Rc::new(Cell::new(0)));
		assert_eq!(a.clone(), a);
		assert!(a.label().contains("closure"));
	}
}
