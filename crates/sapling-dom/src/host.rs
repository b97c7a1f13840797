//! The host tree interface.
//!
//! The renderer consumes the host document only through [`Host`]. Anything
//! that can create elements and text, set attributes, attach listeners and
//! splice children at an [`InsertionPoint`] can back a render.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::HostResult;
use crate::event::{Event, EventHandler};
use crate::node::NodeId;
use crate::point::InsertionPoint;

/// Primitive operations on a host tree.
pub trait Host {
	/// Creates a detached element with the given tag name.
	fn create_element(&mut self, tag: &str) -> HostResult<NodeId>;

	/// Creates a detached text node.
	fn create_text(&mut self, content: &str) -> HostResult<NodeId>;

	/// Sets a string attribute on an element.
	fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> HostResult<()>;

	/// Attaches a listener for `event` to an element.
	fn add_event_listener(
		&mut self,
		element: NodeId,
		event: &str,
		handler: EventHandler,
	) -> HostResult<()>;

	/// Number of children of `node`.
	fn child_count(&self, node: NodeId) -> HostResult<usize>;

	/// The child of `node` at `index`, if any.
	fn child_at(&self, node: NodeId, index: usize) -> HostResult<Option<NodeId>>;

	/// The last child of `node`, if any.
	fn last_child(&self, node: NodeId) -> HostResult<Option<NodeId>> {
		match self.child_count(node)? {
			0 => Ok(None),
			len => self.child_at(node, len - 1),
		}
	}

	/// The parent of `node` and its index among the parent's children.
	fn position_of(&self, node: NodeId) -> HostResult<(NodeId, usize)>;

	/// Removes every child covered by `point` and returns the collapsed point
	/// left behind.
	fn clear(&mut self, point: InsertionPoint) -> HostResult<InsertionPoint>;

	/// Inserts a detached node at a collapsed point and returns the point now
	/// covering it.
	fn insert(&mut self, point: InsertionPoint, node: NodeId) -> HostResult<InsertionPoint>;

	/// Listeners registered on `node` for `event`, in registration order.
	fn listeners(&self, node: NodeId, event: &str) -> HostResult<Vec<EventHandler>>;
}

/// Shared, single-threaded handle to a host.
///
/// Every operation borrows the host only for its own duration, so callbacks
/// running during [`dispatch`](Self::dispatch) are free to mount and patch.
#[derive(Clone)]
pub struct HostHandle {
	inner: Rc<RefCell<dyn Host>>,
}

impl HostHandle {
	/// Takes ownership of `host`.
	pub fn new<H: Host + 'static>(host: H) -> Self {
		Self {
			inner: Rc::new(RefCell::new(host)),
		}
	}

	/// Wraps a host the caller keeps typed access to.
	pub fn from_shared<H: Host + 'static>(host: Rc<RefCell<H>>) -> Self {
		Self { inner: host }
	}

	/// Runs `f` with shared access to the host.
	pub fn read<R>(&self, f: impl FnOnce(&dyn Host) -> R) -> R {
		f(&*self.inner.borrow())
	}

	/// Runs `f` with exclusive access to the host.
	pub fn write<R>(&self, f: impl FnOnce(&mut dyn Host) -> R) -> R {
		f(&mut *self.inner.borrow_mut())
	}

	/// Creates a detached element.
	pub fn create_element(&self, tag: &str) -> HostResult<NodeId> {
		self.write(|host| host.create_element(tag))
	}

	/// Creates a detached text node.
	pub fn create_text(&self, content: &str) -> HostResult<NodeId> {
		self.write(|host| host.create_text(content))
	}

	/// Sets an attribute on an element.
	pub fn set_attribute(&self, element: NodeId, name: &str, value: &str) -> HostResult<()> {
		self.write(|host| host.set_attribute(element, name, value))
	}

	/// Attaches an event listener.
	pub fn add_event_listener(
		&self,
		element: NodeId,
		event: &str,
		handler: EventHandler,
	) -> HostResult<()> {
		self.write(|host| host.add_event_listener(element, event, handler))
	}

	/// Clears the content covered by `point`.
	pub fn clear(&self, point: InsertionPoint) -> HostResult<InsertionPoint> {
		self.write(|host| host.clear(point))
	}

	/// Inserts `node` at a cleared point.
	pub fn insert(&self, point: InsertionPoint, node: NodeId) -> HostResult<InsertionPoint> {
		self.write(|host| host.insert(point, node))
	}

	/// A point spanning the full content of `node`.
	pub fn spanning(&self, node: NodeId) -> HostResult<InsertionPoint> {
		self.read(|host| InsertionPoint::spanning(host, node))
	}

	/// A collapsed point after the last child of `node`.
	pub fn end_of(&self, node: NodeId) -> HostResult<InsertionPoint> {
		self.read(|host| InsertionPoint::end_of(host, node))
	}

	/// Dispatches `event` on `target`, running its listeners synchronously.
	///
	/// Returns the number of listeners invoked. The host is not borrowed while
	/// listeners run.
	pub fn dispatch(&self, target: NodeId, event: &str) -> HostResult<usize> {
		let handlers = self.read(|host| host.listeners(target, event))?;
		tracing::trace!(%target, event, listeners = handlers.len(), "dispatching event");

		let payload = Event::new(event, target);
		for handler in &handlers {
			handler(&payload);
		}
		Ok(handlers.len())
	}

	/// Whether two handles point at the same host.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for HostHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HostHandle").finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::Document;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_dispatch_runs_listeners_in_order() {
		let doc = Rc::new(RefCell::new(Document::new()));
		let host = HostHandle::from_shared(doc.clone());
		let button = host.create_element("button").unwrap();

		let log = Rc::new(RefCell::new(Vec::new()));
		for tag in ["first", "second"] {
			let log = log.clone();
			host.add_event_listener(
				button,
				"click",
				Rc::new(move |event: &Event| log.borrow_mut().push((tag, event.kind().to_string()))),
			)
			.unwrap();
		}

		let ran = host.dispatch(button, "click").unwrap();
		assert_eq!(ran, 2);
		assert_eq!(
			*log.borrow(),
			vec![("first", "click".to_string()), ("second", "click".to_string())]
		);
	}

	#[rstest]
	fn test_dispatch_other_event_runs_nothing() {
		let host = HostHandle::new(Document::new());
		let button = host.create_element("button").unwrap();
		let hits = Rc::new(Cell::new(0));
		let counter = hits.clone();
		host.add_event_listener(button, "click", Rc::new(move |_: &Event| counter.set(counter.get() + 1)))
			.unwrap();

		assert_eq!(host.dispatch(button, "keydown").unwrap(), 0);
		assert_eq!(hits.get(), 0);
	}

	#[rstest]
	fn test_listener_may_mutate_host() {
		let doc = Rc::new(RefCell::new(Document::new()));
		let host = HostHandle::from_shared(doc.clone());
		let body = doc.borrow().body();
		let button = host.create_element("button").unwrap();

		let inner = host.clone();
		host.add_event_listener(
			button,
			"click",
			Rc::new(move |_: &Event| {
				let node = inner.create_text("clicked").unwrap();
				let at = inner.end_of(body).unwrap();
				inner.insert(at, node).unwrap();
			}),
		)
		.unwrap();

		host.dispatch(button, "click").unwrap();
		assert_eq!(doc.borrow().text_content(body).unwrap(), "clicked");
	}

	#[rstest]
	fn test_ptr_eq() {
		let host = HostHandle::new(Document::new());
		let other = HostHandle::new(Document::new());
		assert!(host.ptr_eq(&host.clone()));
		assert!(!host.ptr_eq(&other));
	}
}
