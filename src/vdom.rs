//! Virtual trees, components and reconciliation
//!
//! This module provides access to sapling-vdom.
//!
//! ## Architecture
//!
//! - **Node Factory**: `create_element`, `h!` and `attrs!` build [`VNode`] trees
//! - **Components**: user types implementing [`Component`], with typed state
//!   merged by [`ComponentHandle::set_state`]
//! - **Reconciler**: positional diffing of a new render against the last one
//! - **Roots**: [`render`] mounts a tree into a container and returns a [`Root`]

// Re-export all sapling-vdom functionality
pub use sapling_vdom::*;
