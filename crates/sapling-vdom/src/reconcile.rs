//! Positional reconciliation.
//!
//! [`Renderer::reconcile`] patches the host so that it reflects a new tree,
//! given the previously mounted one:
//!
//! 1. identical trees cause no host mutation; the new tree takes over the
//!    old tree's points, host nodes and component instances
//! 2. nodes of a different type or with different props are mounted fresh at
//!    the old node's point, discarding the old subtree
//! 3. otherwise children are reconciled pairwise by index
//!
//! Children are matched purely by position. Inserting or removing a child in
//! the middle of a list misaligns every later sibling, which then gets
//! patched or replaced one by one.

use sapling_dom::InsertionPoint;

use crate::error::{RenderError, RenderResult};
use crate::node::{ElementNode, VNode};
use crate::props::props_equivalent;
use crate::render::Renderer;

/// Whether `a` and `b` have the same type and equivalent props.
///
/// Text nodes compare their content.
pub fn is_same_node(a: &VNode, b: &VNode) -> bool {
	match (a, b) {
		(VNode::Element(a), VNode::Element(b)) => {
			a.tag_name() == b.tag_name() && props_equivalent(a.props(), b.props())
		}
		(VNode::Text(a), VNode::Text(b)) => a.content() == b.content(),
		(VNode::Component(a), VNode::Component(b)) => {
			a.component_type() == b.component_type() && props_equivalent(a.props(), b.props())
		}
		_ => false,
	}
}

/// Whether `a` and `b` are the same node with pairwise identical children.
pub fn is_same_tree(a: &VNode, b: &VNode) -> bool {
	is_same_node(a, b)
		&& a.children().len() == b.children().len()
		&& a.children()
			.iter()
			.zip(b.children())
			.all(|(a, b)| is_same_tree(a, b))
}

/// Patches `renderer`'s host from the mounted `old` tree to `new`.
///
/// See [`Renderer::reconcile`].
pub fn reconcile(renderer: &Renderer, old: &VNode, new: &mut VNode) -> RenderResult<InsertionPoint> {
	renderer.reconcile(old, new)
}

impl Renderer {
	/// Patches the host from the mounted `old` tree to `new` and returns the
	/// point `new` occupies.
	///
	/// `old` must be mounted. After a successful call `new` is mounted and
	/// `old` should be dropped.
	pub fn reconcile(&self, old: &VNode, new: &mut VNode) -> RenderResult<InsertionPoint> {
		let point = old
			.point()
			.ok_or_else(|| RenderError::not_mounted(old.describe()))?;

		if is_same_tree(old, new) {
			tracing::trace!(node = %old.node_type(), %point, "unchanged");
			new.adopt(old);
			return Ok(point);
		}

		if !is_same_node(old, new) {
			tracing::debug!(
				old = %old.node_type(),
				new = %new.node_type(),
				%point,
				"replacing node"
			);
			return new.mount_to(self, point);
		}

		match (old, new) {
			(VNode::Element(old), VNode::Element(new)) => {
				new.mounted = old.mounted;
				self.reconcile_children(old, new)?;
				Ok(point)
			}
			(VNode::Component(old), VNode::Component(new)) => {
				tracing::debug!(component = old.component_type().name(), %point, "re-rendering component");
				new.adopt_instance(old);
				new.refresh()
			}
			(old, new) => {
				new.adopt(old);
				Ok(point)
			}
		}
	}

	fn reconcile_children(&self, old: &ElementNode, new: &mut ElementNode) -> RenderResult<()> {
		let element = old
			.host_node()
			.ok_or_else(|| RenderError::not_mounted(format!("<{}>", old.tag_name())))?;
		let old_children = old.children();
		let new_children = new.children_mut();

		if old_children.len() != new_children.len() && self.options().warn_on_length_change {
			tracing::warn!(
				tag = old.tag_name(),
				old = old_children.len(),
				new = new_children.len(),
				"child count changed; children are matched by position"
			);
		}

		let common = old_children.len().min(new_children.len());
		for (old_child, new_child) in old_children.iter().zip(new_children.iter_mut()) {
			self.reconcile(old_child, new_child)?;
		}

		// Last to first, so earlier sibling indices stay valid.
		for surplus in old_children[common..].iter().rev() {
			if let Some(point) = surplus.point() {
				self.host().clear(point)?;
			}
		}

		for extra in &mut new_children[common..] {
			let at = self.host().end_of(element)?;
			extra.mount_to(self, at)?;
		}
		Ok(())
	}
}
