//! Node factory.
//!
//! [`create_element`] is the single entry point for building trees, with
//! [`h!`](crate::h) and [`attrs!`](crate::attrs) as shorthand:
//!
//! ```
//! use sapling_vdom::{attrs, create_element, h};
//!
//! let a = create_element("a", [("href", "/home")], "Home");
//! let b = h!("a", { "href" => "/home" }, "Home");
//! let c = create_element("a", attrs! { "href" => "/home" }, "Home");
//! assert!(sapling_vdom::is_same_tree(&a, &b));
//! assert!(sapling_vdom::is_same_tree(&b, &c));
//! ```

use crate::child::IntoChild;
use crate::component::{Component, ComponentNode, ComponentType};
use crate::node::{ElementNode, VNode};
use crate::props::PropValue;

/// What [`create_element`] builds.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
	/// A host element with this tag name.
	Tag(String),
	/// A component.
	Component(ComponentType),
}

impl From<&str> for ElementType {
	fn from(tag: &str) -> Self {
		Self::Tag(tag.to_string())
	}
}

impl From<String> for ElementType {
	fn from(tag: String) -> Self {
		Self::Tag(tag)
	}
}

impl From<ComponentType> for ElementType {
	fn from(ty: ComponentType) -> Self {
		Self::Component(ty)
	}
}

/// The element type of component `C`.
pub fn component<C: Component + Default>() -> ElementType {
	ElementType::Component(ComponentType::of::<C>())
}

/// Ordered attributes passed to [`create_element`].
#[derive(Debug, Clone, Default)]
pub struct Attrs(Vec<(String, PropValue)>);

impl Attrs {
	/// No attributes.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an attribute.
	pub fn push(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
		self.0.push((name.into(), value.into()));
	}

	/// Appends an attribute, builder style.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.push(name, value);
		self
	}

	/// Number of attributes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether there are no attributes.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<()> for Attrs {
	fn from(_: ()) -> Self {
		Self::new()
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attrs
where
	K: Into<String>,
	V: Into<PropValue>,
{
	fn from(entries: [(K, V); N]) -> Self {
		entries.into_iter().collect()
	}
}

impl<K, V> From<Vec<(K, V)>> for Attrs
where
	K: Into<String>,
	V: Into<PropValue>,
{
	fn from(entries: Vec<(K, V)>) -> Self {
		entries.into_iter().collect()
	}
}

impl<K, V> FromIterator<(K, V)> for Attrs
where
	K: Into<String>,
	V: Into<PropValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(name, value)| (name.into(), value.into()))
				.collect(),
		)
	}
}

impl IntoIterator for Attrs {
	type Item = (String, PropValue);
	type IntoIter = std::vec::IntoIter<(String, PropValue)>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Builds a node.
///
/// A tag yields an element node; a component type instantiates the
/// component. Each attribute is applied with one `set_attribute` call, in
/// order. Children are flattened, with non-node leaves wrapped as text.
pub fn create_element(
	ty: impl Into<ElementType>,
	attrs: impl Into<Attrs>,
	children: impl IntoChild,
) -> VNode {
	let children = children.into_child().into_nodes();
	match ty.into() {
		ElementType::Tag(tag) => {
			let mut node = ElementNode::new(tag);
			for (name, value) in attrs.into() {
				node.set_attribute(name, value);
			}
			for child in children {
				node.append_child(child);
			}
			VNode::Element(node)
		}
		ElementType::Component(ty) => {
			let mut node = ComponentNode::new(ty);
			for (name, value) in attrs.into() {
				node.set_attribute(name, value);
			}
			for child in children {
				node.append_child(child);
			}
			VNode::Component(node)
		}
	}
}

/// Builds [`Attrs`] from `name => value` pairs.
///
/// ```
/// use sapling_vdom::attrs;
///
/// let attrs = attrs! { "id" => "main", "tabindex" => 0 };
/// assert_eq!(attrs.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
	() => {
		$crate::Attrs::new()
	};
	($($name:expr => $value:expr),+ $(,)?) => {{
		let mut attrs = $crate::Attrs::new();
		$(attrs.push($name, $value);)+
		attrs
	}};
}

/// Shorthand for [`create_element`](crate::create_element).
///
/// `h!(type, { name => value, .. }, child, ..)` or `h!(type, child, ..)`.
/// Children may be of different types.
#[macro_export]
macro_rules! h {
	($ty:expr, { $($name:expr => $value:expr),* $(,)? } $(, $child:expr)* $(,)?) => {
		$crate::create_element(
			$ty,
			$crate::attrs!($($name => $value),*),
			::std::vec::Vec::<$crate::Child>::from([$($crate::IntoChild::into_child($child)),*]),
		)
	};
	($ty:expr $(, $child:expr)* $(,)?) => {
		$crate::create_element(
			$ty,
			$crate::Attrs::new(),
			::std::vec::Vec::<$crate::Child>::from([$($crate::IntoChild::into_child($child)),*]),
		)
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::child::Child;
	use rstest::rstest;

	#[derive(Default)]
	struct Widget;

	impl Component for Widget {
		type State = ();
	}

	#[rstest]
	fn test_tag_element() {
		let node = create_element("div", [("className", "box")], ["a", "b"]);
		let VNode::Element(el) = &node else {
			panic!("expected an element");
		};
		assert_eq!(el.tag_name(), "div");
		assert_eq!(el.props()["className"].as_str(), Some("box"));
		assert_eq!(el.children().len(), 2);
	}

	#[rstest]
	fn test_component_element() {
		let node = create_element(component::<Widget>(), [("size", 3)], "child");
		let VNode::Component(c) = &node else {
			panic!("expected a component");
		};
		assert_eq!(c.component_type(), ComponentType::of::<Widget>());
		assert_eq!(c.children().len(), 1);
		let props = c.handle::<Widget>().unwrap().props().unwrap();
		assert_eq!(props["size"].as_value(), Some(&serde_json::json!(3)));
	}

	#[rstest]
	fn test_later_attribute_wins() {
		let node = h!("p", { "id" => "a", "id" => "b" });
		assert_eq!(node.props().unwrap()["id"].as_str(), Some("b"));
	}

	#[rstest]
	fn test_h_mixes_children() {
		let node = h!("p", "count: ", 3, h!("br"), None::<VNode>);
		assert_eq!(node.children().len(), 4);
		assert!(matches!(&node.children()[3], VNode::Text(t) if t.content().is_empty()));
	}

	#[rstest]
	fn test_h_without_children() {
		let node = h!("hr", {});
		assert!(node.children().is_empty());
		assert!(node.props().unwrap().is_empty());
	}

	#[rstest]
	fn test_child_passthrough() {
		let node = create_element("div", (), Child::Many(vec![Child::Text("x".into())]));
		assert_eq!(node.children().len(), 1);
	}
}
