//! Virtual nodes.
//!
//! A [`VNode`] is one of three variants:
//!
//! - [`ElementNode`]: a tag with props and children, owning one host element
//! - [`TextNode`]: literal text, owning one host text node
//! - [`ComponentNode`]: a stateful component whose render output is mounted
//!   in its place
//!
//! Trees are snapshots. Mounting records the [`InsertionPoint`] each node now
//! occupies; cloning yields an unmounted description.

use std::fmt;

use sapling_dom::{InsertionPoint, NodeId};

use crate::child::IntoChild;
use crate::component::{ComponentNode, ComponentType};
use crate::error::RenderResult;
use crate::props::{PropValue, Props};
use crate::render::Renderer;

/// Type sentinel for text nodes.
pub const TEXT_NODE_TYPE: &str = "#text";

/// Where a wrapper node lives in the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mounted {
	pub(crate) node: NodeId,
	pub(crate) point: InsertionPoint,
}

/// The type of a node: what the reconciler compares first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType<'a> {
	/// An element with the given tag name.
	Tag(&'a str),
	/// A text node.
	Text,
	/// A component.
	Component(ComponentType),
}

impl fmt::Display for NodeType<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Tag(tag) => write!(f, "<{tag}>"),
			Self::Text => f.write_str(TEXT_NODE_TYPE),
			Self::Component(ty) => write!(f, "component `{}`", ty.name()),
		}
	}
}

/// A virtual node.
#[derive(Debug, Clone)]
pub enum VNode {
	/// A host element.
	Element(ElementNode),
	/// A host text node.
	Text(TextNode),
	/// A component.
	Component(ComponentNode),
}

impl VNode {
	/// Creates an element node.
	pub fn element(tag: impl Into<String>) -> ElementNode {
		ElementNode::new(tag)
	}

	/// Creates a text node.
	pub fn text(content: impl Into<String>) -> Self {
		Self::Text(TextNode::new(content))
	}

	/// The node's type.
	pub fn node_type(&self) -> NodeType<'_> {
		match self {
			Self::Element(el) => NodeType::Tag(el.tag_name()),
			Self::Text(_) => NodeType::Text,
			Self::Component(c) => NodeType::Component(c.component_type()),
		}
	}

	/// The node's props. Text nodes have none.
	pub fn props(&self) -> Option<&Props> {
		match self {
			Self::Element(el) => Some(el.props()),
			Self::Text(_) => None,
			Self::Component(c) => Some(c.props()),
		}
	}

	/// The node's children. Text nodes have none.
	pub fn children(&self) -> &[VNode] {
		match self {
			Self::Element(el) => el.children(),
			Self::Text(_) => &[],
			Self::Component(c) => c.children(),
		}
	}

	/// Records a prop. Ignored on text nodes.
	pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
		let name: String = name.into();
		let value: PropValue = value.into();
		match self {
			Self::Element(el) => el.set_attribute(name, value),
			Self::Component(c) => c.set_attribute(name, value),
			Self::Text(_) => tracing::debug!(%name, "text nodes take no attributes"),
		}
	}

	/// Appends a child. Ignored on text nodes.
	pub fn append_child(&mut self, child: VNode) {
		match self {
			Self::Element(el) => el.append_child(child),
			Self::Component(c) => c.append_child(child),
			Self::Text(_) => {
				tracing::debug!("text nodes take no children");
			}
		}
	}

	/// The point this node occupies, once mounted.
	pub fn point(&self) -> Option<InsertionPoint> {
		match self {
			Self::Element(el) => el.point(),
			Self::Text(text) => text.point(),
			Self::Component(c) => c.point(),
		}
	}

	/// The host node this node materialized as, once mounted.
	///
	/// For components this is the host node of their render output.
	pub fn host_node(&self) -> Option<NodeId> {
		match self {
			Self::Element(el) => el.host_node(),
			Self::Text(text) => text.host_node(),
			Self::Component(c) => c.host_node(),
		}
	}

	/// Materializes the node at `point` and returns the point it occupies.
	pub fn mount_to(&mut self, renderer: &Renderer, point: InsertionPoint) -> RenderResult<InsertionPoint> {
		match self {
			Self::Element(el) => el.mount_to(renderer, point),
			Self::Text(text) => text.mount_to(renderer, point),
			Self::Component(c) => c.mount_to(renderer, point),
		}
	}

	/// Takes over the mounted state of an identical, already mounted tree.
	pub(crate) fn adopt(&mut self, old: &VNode) {
		match (self, old) {
			(Self::Element(new), Self::Element(old)) => {
				new.mounted = old.mounted;
				for (child, old_child) in new.children.iter_mut().zip(&old.children) {
					child.adopt(old_child);
				}
			}
			(Self::Text(new), Self::Text(old)) => new.mounted = old.mounted,
			(Self::Component(new), Self::Component(old)) => new.adopt_instance(old),
			_ => {}
		}
	}

	pub(crate) fn describe(&self) -> String {
		self.node_type().to_string()
	}
}

/// A host element description.
#[derive(Debug)]
pub struct ElementNode {
	tag: String,
	props: Props,
	children: Vec<VNode>,
	pub(crate) mounted: Option<Mounted>,
}

impl Clone for ElementNode {
	fn clone(&self) -> Self {
		Self {
			tag: self.tag.clone(),
			props: self.props.clone(),
			children: self.children.clone(),
			mounted: None,
		}
	}
}

impl ElementNode {
	/// Creates an element with no props or children.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			props: Props::new(),
			children: Vec::new(),
			mounted: None,
		}
	}

	/// Adds a prop.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.set_attribute(name, value);
		self
	}

	/// Adds children, flattening sequences.
	pub fn child(mut self, child: impl IntoChild) -> Self {
		let mut nodes = Vec::new();
		child.into_child().flatten_into(&mut nodes);
		self.children.extend(nodes);
		self
	}

	/// Records a prop, replacing any previous value.
	pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
		self.props.insert(name.into(), value.into());
	}

	/// Appends a child.
	pub fn append_child(&mut self, child: VNode) {
		self.children.push(child);
	}

	/// The tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// The props.
	pub fn props(&self) -> &Props {
		&self.props
	}

	/// The children.
	pub fn children(&self) -> &[VNode] {
		&self.children
	}

	pub(crate) fn children_mut(&mut self) -> &mut [VNode] {
		&mut self.children
	}

	/// The point this element occupies, once mounted.
	pub fn point(&self) -> Option<InsertionPoint> {
		self.mounted.map(|m| m.point)
	}

	/// The host element, once mounted.
	pub fn host_node(&self) -> Option<NodeId> {
		self.mounted.map(|m| m.node)
	}

	/// Clears `point`, builds the host element with its props and children,
	/// and inserts it at the cleared point.
	pub fn mount_to(&mut self, renderer: &Renderer, point: InsertionPoint) -> RenderResult<InsertionPoint> {
		let host = renderer.host();
		let point = host.clear(point)?;
		let element = host.create_element(&self.tag)?;

		for (name, value) in &self.props {
			apply_prop(renderer, element, name, value)?;
		}

		for child in &mut self.children {
			let at = host.end_of(element)?;
			child.mount_to(renderer, at)?;
		}

		let occupied = host.insert(point, element)?;
		self.mounted = Some(Mounted {
			node: element,
			point: occupied,
		});
		Ok(occupied)
	}
}

impl From<ElementNode> for VNode {
	fn from(el: ElementNode) -> Self {
		Self::Element(el)
	}
}

/// A host text description.
#[derive(Debug)]
pub struct TextNode {
	content: String,
	pub(crate) mounted: Option<Mounted>,
}

impl Clone for TextNode {
	fn clone(&self) -> Self {
		Self::new(self.content.clone())
	}
}

impl TextNode {
	/// Creates a text node.
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
			mounted: None,
		}
	}

	/// The literal content.
	pub fn content(&self) -> &str {
		&self.content
	}

	/// The point this text occupies, once mounted.
	pub fn point(&self) -> Option<InsertionPoint> {
		self.mounted.map(|m| m.point)
	}

	/// The host text node, once mounted.
	pub fn host_node(&self) -> Option<NodeId> {
		self.mounted.map(|m| m.node)
	}

	/// Clears `point` and inserts a host text node there.
	pub fn mount_to(&mut self, renderer: &Renderer, point: InsertionPoint) -> RenderResult<InsertionPoint> {
		let host = renderer.host();
		let point = host.clear(point)?;
		let node = host.create_text(&self.content)?;
		let occupied = host.insert(point, node)?;
		self.mounted = Some(Mounted {
			node,
			point: occupied,
		});
		Ok(occupied)
	}
}

impl From<TextNode> for VNode {
	fn from(text: TextNode) -> Self {
		Self::Text(text)
	}
}

/// Derives the event name from an `on<EventName>` prop name.
///
/// ```
/// use sapling_vdom::node::event_name;
///
/// assert_eq!(event_name("onClick").as_deref(), Some("click"));
/// assert_eq!(event_name("onMouseEnter").as_deref(), Some("mouseenter"));
/// assert_eq!(event_name("on"), None);
/// assert_eq!(event_name("title"), None);
/// ```
pub fn event_name(prop: &str) -> Option<String> {
	prop.strip_prefix("on")
		.filter(|rest| !rest.is_empty())
		.map(str::to_lowercase)
}

/// Host attribute name for a prop name.
pub fn attribute_name(prop: &str) -> &str {
	match prop {
		"className" => "class",
		other => other,
	}
}

fn apply_prop(
	renderer: &Renderer,
	element: NodeId,
	name: &str,
	value: &PropValue,
) -> RenderResult<()> {
	let host = renderer.host();
	match (event_name(name), value) {
		(Some(event), PropValue::Handler(callback)) => {
			host.add_event_listener(element, &event, callback.handler())?;
		}
		(_, PropValue::Handler(callback)) => {
			tracing::debug!(
				prop = name,
				handler = callback.label(),
				"handler under a non-event prop name is not applied"
			);
		}
		(_, PropValue::Value(_)) => {
			if let Some(text) = value.to_attribute_value() {
				host.set_attribute(element, attribute_name(name), &text)?;
			}
		}
	}
	Ok(())
}
