//! # Sapling
//!
//! A minimal virtual-tree renderer. Sapling builds in-memory descriptions of
//! UI structure, mounts them into a host document, and keeps stateful
//! components in sync by diffing each render against the previous one and
//! patching only the subtrees that differ.
//!
//! ## Core Principles
//!
//! - **Narrow host interface**: the renderer only talks to [`dom::Host`]
//! - **Explicit insertion points**: every mount takes a point and returns the point it occupies
//! - **Positional reconciliation**: children are matched by index, never by key
//! - **Synchronous updates**: `set_state` patches the host before it returns
//!
//! ## Feature Flags
//!
//! - `vdom` (default) - virtual nodes, components and reconciliation
//!
//! Without `vdom` only the host interface and in-memory document are built.
//!
//! ## Quick Example
//!
//! ```rust
//! use sapling::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let doc = Rc::new(RefCell::new(Document::new()));
//! let body = doc.borrow().body();
//! let host = HostHandle::from_shared(doc.clone());
//!
//! render(h!("ul", h!("li", "one"), h!("li", "two")), body, &host).unwrap();
//! assert_eq!(
//!     doc.borrow().inner_html(body).unwrap(),
//!     "<ul><li>one</li><li>two</li></ul>"
//! );
//! ```

pub mod dom;
#[cfg(feature = "vdom")]
pub mod vdom;

#[cfg(feature = "vdom")]
pub use sapling_vdom::{attrs, h};

/// Commonly used types.
pub mod prelude {
	pub use crate::dom::{
		Document, Event, Host, HostError, HostHandle, InsertionPoint, Mutation, NodeId,
	};

	#[cfg(feature = "vdom")]
	pub use crate::vdom::{
		Callback, Component, ComponentHandle, MountMode, PropValue, RenderError, RenderOptions,
		RenderResult, Root, Scope, VNode, component, create_element, render, render_with,
	};

	#[cfg(feature = "vdom")]
	pub use crate::{attrs, h};
}
