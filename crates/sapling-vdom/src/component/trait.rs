//! Component trait definition.

use std::any::{TypeId, type_name};
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::handle::Scope;
use super::instance::{AnyInstance, InstanceCell};
use crate::error::{RenderError, RenderResult};
use crate::node::VNode;
use crate::props::PropValue;

/// Trait for stateful UI components.
///
/// A component renders exactly one [`VNode`] from its props, children and
/// state. The framework owns the instance: it is created with
/// [`Default`], mounted once, and re-rendered in place whenever its state
/// changes or its parent passes different props.
///
/// # Example
///
/// ```
/// use sapling_vdom::{Component, RenderResult, Scope, VNode, h};
///
/// #[derive(Default)]
/// struct Greeting;
///
/// impl Component for Greeting {
///     type State = ();
///
///     fn render(&self, scope: &Scope<'_, Self>) -> RenderResult<VNode> {
///         let name = scope.prop_str("name").unwrap_or("world");
///         Ok(h!("p", format!("Hello, {name}!")))
///     }
/// }
/// ```
pub trait Component: Sized + 'static {
	/// Component-local state, merged by
	/// [`ComponentHandle::set_state`](super::ComponentHandle::set_state).
	type State: Serialize + DeserializeOwned + Default + 'static;

	/// Renders the component.
	///
	/// Components that do not override this fail to mount with
	/// [`RenderError::MissingRender`].
	fn render(&self, scope: &Scope<'_, Self>) -> RenderResult<VNode> {
		let _ = scope;
		Err(RenderError::MissingRender {
			component: Self::name(),
		})
	}

	/// Returns the component's name for diagnostics.
	fn name() -> &'static str {
		type_name::<Self>()
	}

	/// Called for every prop the parent sets, after it is recorded in the
	/// instance's props.
	fn set_attribute(&mut self, name: &str, value: &PropValue) {
		let _ = (name, value);
	}
}

/// Runtime identity of a component type.
///
/// Two component nodes have the same type exactly when they were built from
/// the same Rust type.
#[derive(Clone, Copy)]
pub struct ComponentType {
	id: TypeId,
	name: &'static str,
	construct: fn() -> Rc<dyn AnyInstance>,
}

impl ComponentType {
	/// The identity of `C`.
	pub fn of<C: Component + Default>() -> Self {
		Self {
			id: TypeId::of::<C>(),
			name: C::name(),
			construct: InstanceCell::<C>::spawn,
		}
	}

	/// The underlying type id.
	pub fn id(&self) -> TypeId {
		self.id
	}

	/// The component's name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub(crate) fn instantiate(&self) -> Rc<dyn AnyInstance> {
		(self.construct)()
	}
}

impl PartialEq for ComponentType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for ComponentType {}

impl fmt::Debug for ComponentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentType")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}
