//! Render roots.

use sapling_dom::{HostHandle, InsertionPoint, NodeId};

use crate::component::{Component, ComponentHandle};
use crate::error::RenderResult;
use crate::node::VNode;

/// Where the initial render lands inside its container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MountMode {
	/// Replace everything already in the container.
	#[default]
	ReplaceContents,
	/// Keep existing content and mount after the container's last child.
	Append,
}

/// Options for rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
	/// Where the initial render lands.
	pub mount_mode: MountMode,
	/// Whether the reconciler warns when a child list changes length.
	pub warn_on_length_change: bool,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			mount_mode: MountMode::ReplaceContents,
			warn_on_length_change: true,
		}
	}
}

impl RenderOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the mount mode.
	pub fn mount_mode(mut self, mode: MountMode) -> Self {
		self.mount_mode = mode;
		self
	}

	/// Keeps existing container content.
	pub fn append(self) -> Self {
		self.mount_mode(MountMode::Append)
	}

	/// Enables or disables the child-count warning.
	pub fn warn_on_length_change(mut self, enable: bool) -> Self {
		self.warn_on_length_change = enable;
		self
	}
}

/// Mounts and patches trees against one host.
#[derive(Debug, Clone)]
pub struct Renderer {
	host: HostHandle,
	options: RenderOptions,
}

impl Renderer {
	/// Creates a renderer with default options.
	pub fn new(host: HostHandle) -> Self {
		Self::with_options(host, RenderOptions::default())
	}

	/// Creates a renderer with the given options.
	pub fn with_options(host: HostHandle, options: RenderOptions) -> Self {
		Self { host, options }
	}

	/// The host.
	pub fn host(&self) -> &HostHandle {
		&self.host
	}

	/// The options.
	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// The point a new render lands at inside `container`.
	pub fn initial_point(&self, container: NodeId) -> RenderResult<InsertionPoint> {
		let point = match self.options.mount_mode {
			MountMode::ReplaceContents => self.host.spanning(container)?,
			MountMode::Append => self.host.end_of(container)?,
		};
		Ok(point)
	}

	/// Mounts `tree` into `container`.
	pub fn render(&self, mut tree: VNode, container: NodeId) -> RenderResult<Root> {
		let point = self.initial_point(container)?;
		tracing::debug!(
			node = %tree.node_type(),
			%container,
			%point,
			mode = ?self.options.mount_mode,
			"rendering root"
		);
		tree.mount_to(self, point)?;
		Ok(Root {
			renderer: self.clone(),
			container,
			tree,
		})
	}
}

/// Mounts `tree` into `container` with default options.
pub fn render(tree: VNode, container: NodeId, host: &HostHandle) -> RenderResult<Root> {
	Renderer::new(host.clone()).render(tree, container)
}

/// Mounts `tree` into `container` with `options`.
pub fn render_with(
	tree: VNode,
	container: NodeId,
	host: &HostHandle,
	options: &RenderOptions,
) -> RenderResult<Root> {
	Renderer::with_options(host.clone(), options.clone()).render(tree, container)
}

/// A mounted tree.
///
/// The root owns the tree, and with it every component instance in it.
/// Dropping the root leaves the host content in place but detaches all
/// component handles.
#[derive(Debug)]
pub struct Root {
	renderer: Renderer,
	container: NodeId,
	tree: VNode,
}

impl Root {
	/// The mounted tree.
	pub fn tree(&self) -> &VNode {
		&self.tree
	}

	/// The container the tree was rendered into.
	pub fn container(&self) -> NodeId {
		self.container
	}

	/// The renderer.
	pub fn renderer(&self) -> &Renderer {
		&self.renderer
	}

	/// The point the tree occupies.
	pub fn point(&self) -> Option<InsertionPoint> {
		self.tree.point()
	}

	/// The host node the tree materialized as.
	pub fn host_node(&self) -> Option<NodeId> {
		self.tree.host_node()
	}

	/// A handle to the root component, if the root is a `C`.
	pub fn handle<C: Component>(&self) -> Option<ComponentHandle<C>> {
		match &self.tree {
			VNode::Component(node) => node.handle::<C>(),
			_ => None,
		}
	}

	/// Reconciles the mounted tree against `tree`.
	///
	/// On failure the host may be partially patched and the root keeps the
	/// previous tree.
	pub fn update(&mut self, mut tree: VNode) -> RenderResult<InsertionPoint> {
		let point = self.renderer.reconcile(&self.tree, &mut tree)?;
		self.tree = tree;
		Ok(point)
	}
}
