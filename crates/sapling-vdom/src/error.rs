//! Render error types.

use sapling_dom::HostError;
use thiserror::Error;

/// Result type for mount, update and reconcile operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while mounting, updating or patching a tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
	/// The component does not provide a render implementation.
	#[error("component `{component}` has no render implementation")]
	MissingRender {
		/// Component name.
		component: &'static str,
	},

	/// The node or component has not been mounted yet.
	#[error("{node} is not mounted")]
	NotMounted {
		/// Description of the node.
		node: String,
	},

	/// The component was asked to update while it is already updating.
	#[error("component `{component}` is already updating")]
	ReentrantUpdate {
		/// Component name.
		component: &'static str,
	},

	/// The component instance behind a handle has been dropped.
	#[error("component instance has been dropped")]
	Detached,

	/// Merged state no longer matches the component's state type.
	#[error("state of component `{component}` does not match its schema: {source}")]
	State {
		/// Component name.
		component: &'static str,
		/// The underlying conversion error.
		#[source]
		source: serde_json::Error,
	},

	/// A host operation failed.
	#[error(transparent)]
	Host(#[from] HostError),
}

impl RenderError {
	pub(crate) fn not_mounted(node: impl Into<String>) -> Self {
		Self::NotMounted { node: node.into() }
	}
}
