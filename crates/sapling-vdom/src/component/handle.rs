//! Handles to live instances and the render scope.

use std::fmt;
use std::rc::{Rc, Weak};

use sapling_dom::{Event, InsertionPoint, NodeId};
use serde_json::Value;

use super::instance::{AnyInstance, Instance, InstanceCell};
use super::r#trait::Component;
use crate::callback::Callback;
use crate::error::{RenderError, RenderResult};
use crate::node::VNode;
use crate::props::{PropValue, Props};

/// A weak handle to a live component instance.
///
/// Handles never keep an instance alive. Once the tree that owns the
/// instance drops it, every operation fails with [`RenderError::Detached`].
pub struct ComponentHandle<C: Component> {
	cell: Weak<InstanceCell<C>>,
}

impl<C: Component> Clone for ComponentHandle<C> {
	fn clone(&self) -> Self {
		Self {
			cell: self.cell.clone(),
		}
	}
}

impl<C: Component> ComponentHandle<C> {
	pub(crate) fn new(cell: Weak<InstanceCell<C>>) -> Self {
		Self { cell }
	}

	fn upgrade(&self) -> RenderResult<Rc<InstanceCell<C>>> {
		self.cell.upgrade().ok_or(RenderError::Detached)
	}

	/// Deep-merges `partial` into the component's state and re-renders it
	/// synchronously.
	///
	/// Objects merge key by key and arrays index by index; scalars overwrite.
	/// Absent state starts from `C::State::default()`.
	pub fn set_state(&self, partial: Value) -> RenderResult<()> {
		self.upgrade()?.set_state(&partial).map(|_| ())
	}

	/// Re-renders the component and patches the host.
	pub fn update(&self) -> RenderResult<()> {
		self.upgrade()?.update().map(|_| ())
	}

	/// Runs `f` with the current state, `None` until the first `set_state`.
	pub fn with_state<R>(&self, f: impl FnOnce(Option<&C::State>) -> R) -> RenderResult<R> {
		self.upgrade()?.read(|instance| f(instance.state.as_ref()))
	}

	/// A copy of the current state.
	pub fn state(&self) -> RenderResult<Option<C::State>>
	where
		C::State: Clone,
	{
		self.with_state(|state| state.cloned())
	}

	/// Runs `f` with the component value.
	pub fn with_component<R>(&self, f: impl FnOnce(&C) -> R) -> RenderResult<R> {
		self.upgrade()?.read(|instance| f(&instance.component))
	}

	/// A copy of the props last set by the parent.
	pub fn props(&self) -> RenderResult<Props> {
		self.upgrade()?.read(|instance| instance.props.clone())
	}

	/// Whether the instance is alive and mounted.
	pub fn is_mounted(&self) -> bool {
		self.cell
			.upgrade()
			.is_some_and(|cell| cell.is_mounted())
	}

	/// The point the component's output occupies.
	pub fn point(&self) -> Option<InsertionPoint> {
		self.cell.upgrade().and_then(|cell| cell.point())
	}

	/// The host node of the component's output.
	pub fn host_node(&self) -> Option<NodeId> {
		self.cell.upgrade().and_then(|cell| cell.host_node())
	}

	/// Whether both handles refer to the same instance.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Weak::ptr_eq(&self.cell, &other.cell)
	}
}

impl<C: Component> fmt::Debug for ComponentHandle<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentHandle")
			.field("component", &C::name())
			.field("alive", &(self.cell.strong_count() > 0))
			.finish()
	}
}

/// What a component sees while rendering.
pub struct Scope<'a, C: Component> {
	instance: &'a Instance<C>,
	handle: ComponentHandle<C>,
}

impl<'a, C: Component> Scope<'a, C> {
	pub(crate) fn new(instance: &'a Instance<C>, handle: ComponentHandle<C>) -> Self {
		Self { instance, handle }
	}

	/// The props set by the parent.
	pub fn props(&self) -> &Props {
		&self.instance.props
	}

	/// A single prop.
	pub fn prop(&self, name: &str) -> Option<&PropValue> {
		self.instance.props.get(name)
	}

	/// A string prop.
	pub fn prop_str(&self, name: &str) -> Option<&str> {
		self.prop(name).and_then(PropValue::as_str)
	}

	/// The children passed by the parent.
	pub fn children(&self) -> &[VNode] {
		&self.instance.children
	}

	/// The current state, `None` until the first `set_state`.
	pub fn state(&self) -> Option<&C::State> {
		self.instance.state.as_ref()
	}

	/// A handle to this instance.
	pub fn handle(&self) -> ComponentHandle<C> {
		self.handle.clone()
	}

	/// Builds an event handler bound to this instance.
	///
	/// Errors returned by `f` are logged; listeners cannot propagate them.
	/// Handlers built from the same closure compare equal across renders.
	pub fn callback<F>(&self, f: F) -> Callback
	where
		F: Fn(&ComponentHandle<C>, &Event) -> RenderResult<()> + 'static,
	{
		let handle = self.handle.clone();
		Callback::keyed::<F>(Rc::new(move |event: &Event| {
			if let Err(error) = f(&handle, event) {
				tracing::error!(
					component = C::name(),
					event = event.kind(),
					%error,
					"event callback failed"
				);
			}
		}))
	}
}
