//! Child conversion.
//!
//! Anything passed as a child of [`create_element`](crate::create_element)
//! goes through [`IntoChild`]. Strings, numbers and booleans become text,
//! sequences are flattened in place, and `()` contributes no children at all.
//! An absent optional child (`None`) becomes an empty text node so that sibling
//! positions stay stable.

use std::borrow::Cow;

use crate::node::{ElementNode, TextNode, VNode};

/// A child before flattening.
#[derive(Debug, Clone)]
pub enum Child {
	/// A node.
	Node(VNode),
	/// Text content.
	Text(String),
	/// A sequence, flattened into the parent's children.
	Many(Vec<Child>),
}

impl Child {
	/// Appends the flattened nodes of this child to `out`.
	pub fn flatten_into(self, out: &mut Vec<VNode>) {
		match self {
			Self::Node(node) => out.push(node),
			Self::Text(text) => out.push(VNode::text(text)),
			Self::Many(children) => {
				for child in children {
					child.flatten_into(out);
				}
			}
		}
	}

	/// The flattened nodes of this child.
	pub fn into_nodes(self) -> Vec<VNode> {
		let mut out = Vec::new();
		self.flatten_into(&mut out);
		out
	}
}

/// Conversion into a [`Child`].
pub trait IntoChild {
	/// Converts `self`.
	fn into_child(self) -> Child;
}

impl IntoChild for Child {
	fn into_child(self) -> Child {
		self
	}
}

impl IntoChild for VNode {
	fn into_child(self) -> Child {
		Child::Node(self)
	}
}

impl IntoChild for ElementNode {
	fn into_child(self) -> Child {
		Child::Node(VNode::Element(self))
	}
}

impl IntoChild for TextNode {
	fn into_child(self) -> Child {
		Child::Node(VNode::Text(self))
	}
}

impl IntoChild for String {
	fn into_child(self) -> Child {
		Child::Text(self)
	}
}

impl IntoChild for &str {
	fn into_child(self) -> Child {
		Child::Text(self.to_string())
	}
}

impl IntoChild for &String {
	fn into_child(self) -> Child {
		Child::Text(self.clone())
	}
}

impl IntoChild for Cow<'_, str> {
	fn into_child(self) -> Child {
		Child::Text(self.into_owned())
	}
}

impl IntoChild for () {
	fn into_child(self) -> Child {
		Child::Many(Vec::new())
	}
}

impl<T: IntoChild> IntoChild for Option<T> {
	fn into_child(self) -> Child {
		match self {
			Some(child) => child.into_child(),
			None => Child::Text(String::new()),
		}
	}
}

impl<T: IntoChild> IntoChild for Vec<T> {
	fn into_child(self) -> Child {
		Child::Many(self.into_iter().map(IntoChild::into_child).collect())
	}
}

impl<T: IntoChild, const N: usize> IntoChild for [T; N] {
	fn into_child(self) -> Child {
		Child::Many(self.into_iter().map(IntoChild::into_child).collect())
	}
}

macro_rules! impl_into_child_display {
	($($ty:ty),* $(,)?) => {
		$(
			impl IntoChild for $ty {
				fn into_child(self) -> Child {
					Child::Text(self.to_string())
				}
			}
		)*
	};
}

impl_into_child_display!(
	char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

macro_rules! impl_into_child_tuple {
	($($name:ident),+) => {
		impl<$($name: IntoChild),+> IntoChild for ($($name,)+) {
			#[allow(non_snake_case)]
			fn into_child(self) -> Child {
				let ($($name,)+) = self;
				Child::Many(vec![$($name.into_child()),+])
			}
		}
	};
}

impl_into_child_tuple!(A, B);
impl_into_child_tuple!(A, B, C);
impl_into_child_tuple!(A, B, C, D);
impl_into_child_tuple!(A, B, C, D, E);
