//! Live component instances and the component node wrapping them.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use sapling_dom::{InsertionPoint, NodeId};
use serde_json::Value;

use super::handle::{ComponentHandle, Scope};
use super::state::deep_merge;
use super::r#trait::{Component, ComponentType};
use crate::error::{RenderError, RenderResult};
use crate::node::VNode;
use crate::props::{PropValue, Props};
use crate::render::Renderer;

/// Mutable data of a live instance.
pub(crate) struct Instance<C: Component> {
	pub(crate) component: C,
	pub(crate) props: Props,
	pub(crate) children: Vec<VNode>,
	pub(crate) state: Option<C::State>,
	last_rendered: Option<VNode>,
	point: Option<InsertionPoint>,
	renderer: Option<Renderer>,
}

/// Shared cell owning one component instance.
pub(crate) struct InstanceCell<C: Component> {
	this: Weak<InstanceCell<C>>,
	updating: Cell<bool>,
	inner: RefCell<Instance<C>>,
}

/// Type-erased operations on an instance cell.
pub(crate) trait AnyInstance {
	fn name(&self) -> &'static str;

	/// Records a prop and offers it to the component's mirror hook.
	fn set_attribute(&self, name: &str, value: &PropValue);

	fn append_child(&self, child: VNode);

	/// Replaces props and children with those of a newer description.
	fn receive(&self, props: &Props, children: &[VNode]);

	/// Records `renderer` and `point`, then renders from scratch.
	fn mount_to(&self, renderer: &Renderer, point: InsertionPoint) -> RenderResult<InsertionPoint>;

	fn update(&self) -> RenderResult<InsertionPoint>;

	fn point(&self) -> Option<InsertionPoint>;

	fn host_node(&self) -> Option<NodeId>;

	fn as_any(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<C: Component + Default> InstanceCell<C> {
	pub(crate) fn spawn() -> Rc<dyn AnyInstance> {
		let cell: Rc<Self> = Rc::new_cyclic(|this| Self {
			this: this.clone(),
			updating: Cell::new(false),
			inner: RefCell::new(Instance {
				component: C::default(),
				props: Props::new(),
				children: Vec::new(),
				state: None,
				last_rendered: None,
				point: None,
				renderer: None,
			}),
		});
		cell
	}
}

impl<C: Component> InstanceCell<C> {
	fn reentrant() -> RenderError {
		RenderError::ReentrantUpdate {
			component: C::name(),
		}
	}

	pub(crate) fn handle(&self) -> ComponentHandle<C> {
		ComponentHandle::new(self.this.clone())
	}

	pub(crate) fn is_mounted(&self) -> bool {
		self.inner
			.try_borrow()
			.is_ok_and(|inner| inner.point.is_some())
	}

	/// Runs `f` with shared access to the instance data.
	pub(crate) fn read<R>(&self, f: impl FnOnce(&Instance<C>) -> R) -> RenderResult<R> {
		let inner = self.inner.try_borrow().map_err(|_| Self::reentrant())?;
		Ok(f(&inner))
	}

	/// Deep-merges `partial` into the state, then re-renders.
	pub(crate) fn set_state(&self, partial: &Value) -> RenderResult<InsertionPoint> {
		if self.updating.get() {
			return Err(Self::reentrant());
		}

		{
			let mut inner = self.inner.try_borrow_mut().map_err(|_| Self::reentrant())?;
			let current = match &inner.state {
				Some(state) => serde_json::to_value(state),
				None => serde_json::to_value(C::State::default()),
			};
			let mut merged = current.map_err(|source| RenderError::State {
				component: C::name(),
				source,
			})?;
			deep_merge(&mut merged, partial);
			let next = serde_json::from_value(merged).map_err(|source| RenderError::State {
				component: C::name(),
				source,
			})?;
			inner.state = Some(next);
		}

		self.update()
	}

	fn render(&self) -> RenderResult<VNode> {
		let inner = self.inner.try_borrow().map_err(|_| Self::reentrant())?;
		let scope = Scope::new(&inner, self.handle());
		inner.component.render(&scope)
	}
}

impl<C: Component> AnyInstance for InstanceCell<C> {
	fn name(&self) -> &'static str {
		C::name()
	}

	fn set_attribute(&self, name: &str, value: &PropValue) {
		let Ok(mut inner) = self.inner.try_borrow_mut() else {
			tracing::warn!(component = C::name(), prop = name, "instance busy, prop dropped");
			return;
		};
		let inner = &mut *inner;
		inner.props.insert(name.to_string(), value.clone());
		inner.component.set_attribute(name, value);
	}

	fn append_child(&self, child: VNode) {
		match self.inner.try_borrow_mut() {
			Ok(mut inner) => inner.children.push(child),
			Err(_) => tracing::warn!(component = C::name(), "instance busy, child dropped"),
		}
	}

	fn receive(&self, props: &Props, children: &[VNode]) {
		let Ok(mut inner) = self.inner.try_borrow_mut() else {
			tracing::warn!(component = C::name(), "instance busy, props not received");
			return;
		};
		let inner = &mut *inner;
		inner.props = props.clone();
		for (name, value) in props {
			inner.component.set_attribute(name, value);
		}
		inner.children = children.to_vec();
	}

	fn mount_to(&self, renderer: &Renderer, point: InsertionPoint) -> RenderResult<InsertionPoint> {
		if self.updating.get() {
			return Err(Self::reentrant());
		}
		{
			let mut inner = self.inner.try_borrow_mut().map_err(|_| Self::reentrant())?;
			inner.renderer = Some(renderer.clone());
			inner.point = Some(point);
			inner.last_rendered = None;
		}
		tracing::debug!(component = C::name(), %point, "mounting component");
		self.update()
	}

	fn update(&self) -> RenderResult<InsertionPoint> {
		if self.updating.replace(true) {
			return Err(Self::reentrant());
		}
		let _updating = scopeguard::guard(&self.updating, |flag| flag.set(false));

		let (renderer, point, previous) = {
			let mut inner = self.inner.try_borrow_mut().map_err(|_| Self::reentrant())?;
			let (Some(renderer), Some(point)) = (inner.renderer.clone(), inner.point) else {
				return Err(RenderError::not_mounted(format!("component `{}`", C::name())));
			};
			(renderer, point, inner.last_rendered.take())
		};

		let outcome = self.render().and_then(|mut tree| {
			let occupied = match &previous {
				None => tree.mount_to(&renderer, point)?,
				Some(old) => renderer.reconcile(old, &mut tree)?,
			};
			Ok((tree, occupied))
		});

		let mut inner = self.inner.try_borrow_mut().map_err(|_| Self::reentrant())?;
		match outcome {
			Ok((tree, occupied)) => {
				tracing::debug!(component = C::name(), point = %occupied, "component updated");
				inner.last_rendered = Some(tree);
				inner.point = Some(occupied);
				Ok(occupied)
			}
			Err(error) => {
				inner.last_rendered = previous;
				Err(error)
			}
		}
	}

	fn point(&self) -> Option<InsertionPoint> {
		self.inner.try_borrow().ok().and_then(|inner| inner.point)
	}

	fn host_node(&self) -> Option<NodeId> {
		self.inner
			.try_borrow()
			.ok()
			.and_then(|inner| inner.last_rendered.as_ref().and_then(VNode::host_node))
	}

	fn as_any(self: Rc<Self>) -> Rc<dyn Any> {
		self
	}
}

/// A component in a virtual tree.
///
/// The node carries the props and children its parent described; the live
/// instance behind it carries state and the last rendered tree.
pub struct ComponentNode {
	ty: ComponentType,
	props: Props,
	children: Vec<VNode>,
	instance: Rc<dyn AnyInstance>,
}

impl ComponentNode {
	/// Instantiates a component of type `ty` with no props or children.
	pub fn new(ty: ComponentType) -> Self {
		Self {
			ty,
			props: Props::new(),
			children: Vec::new(),
			instance: ty.instantiate(),
		}
	}

	/// The component's type.
	pub fn component_type(&self) -> ComponentType {
		self.ty
	}

	/// The props set by the parent.
	pub fn props(&self) -> &Props {
		&self.props
	}

	/// The children passed by the parent.
	pub fn children(&self) -> &[VNode] {
		&self.children
	}

	/// Records a prop on the node and on its instance.
	pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
		let name = name.into();
		let value = value.into();
		self.instance.set_attribute(&name, &value);
		self.props.insert(name, value);
	}

	/// Appends a child on the node and on its instance.
	pub fn append_child(&mut self, child: VNode) {
		self.instance.append_child(child.clone());
		self.children.push(child);
	}

	/// The point the component's output occupies, once mounted.
	pub fn point(&self) -> Option<InsertionPoint> {
		self.instance.point()
	}

	/// The host node of the component's output, once mounted.
	pub fn host_node(&self) -> Option<NodeId> {
		self.instance.host_node()
	}

	/// Mounts the component at `point` and returns the point it occupies.
	pub fn mount_to(&mut self, renderer: &Renderer, point: InsertionPoint) -> RenderResult<InsertionPoint> {
		self.instance.mount_to(renderer, point)
	}

	/// A handle to the live instance, if it is a `C`.
	pub fn handle<C: Component>(&self) -> Option<ComponentHandle<C>> {
		self.instance
			.clone()
			.as_any()
			.downcast::<InstanceCell<C>>()
			.ok()
			.map(|cell| cell.handle())
	}

	/// Takes over the live instance of `old`.
	pub(crate) fn adopt_instance(&mut self, old: &ComponentNode) {
		self.instance = old.instance.clone();
	}

	/// Hands this node's props and children to the adopted instance and
	/// re-renders it.
	pub(crate) fn refresh(&mut self) -> RenderResult<InsertionPoint> {
		self.instance.receive(&self.props, &self.children);
		self.instance.update()
	}
}

impl Clone for ComponentNode {
	fn clone(&self) -> Self {
		let mut node = Self::new(self.ty);
		for (name, value) in &self.props {
			node.set_attribute(name.clone(), value.clone());
		}
		for child in &self.children {
			node.append_child(child.clone());
		}
		node
	}
}

impl fmt::Debug for ComponentNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentNode")
			.field("type", &self.ty.name())
			.field("props", &self.props)
			.field("children", &self.children)
			.field("point", &self.point())
			.finish()
	}
}

impl From<ComponentNode> for VNode {
	fn from(node: ComponentNode) -> Self {
		Self::Component(node)
	}
}
