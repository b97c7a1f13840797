//! Sapling VDOM - virtual trees and reconciliation
//!
//! This crate builds in-memory descriptions of UI structure, mounts them into
//! a host document through [`sapling_dom::Host`], and keeps stateful
//! components in sync by diffing each new render against the previous one.
//!
//! ## Modules
//!
//! - [`node`]: [`VNode`] and the element and text wrappers
//! - [`factory`]: [`create_element`] with the [`h!`] and [`attrs!`] macros
//! - [`component`]: the [`Component`] trait, live instances and state merge
//! - [`reconcile`]: positional tree diffing
//! - [`render`]: render roots and [`RenderOptions`]
//!
//! ## Example
//!
//! ```
//! use sapling_dom::{Document, HostHandle};
//! use sapling_vdom::{h, render};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let doc = Rc::new(RefCell::new(Document::new()));
//! let body = doc.borrow().body();
//! let host = HostHandle::from_shared(doc.clone());
//!
//! let mut root = render(h!("p", { "className" => "note" }, "hi"), body, &host).unwrap();
//! assert_eq!(doc.borrow().inner_html(body).unwrap(), "<p class=\"note\">hi</p>");
//!
//! root.update(h!("p", { "className" => "note" }, "bye")).unwrap();
//! assert_eq!(doc.borrow().inner_html(body).unwrap(), "<p class=\"note\">bye</p>");
//! ```

#![warn(missing_docs)]

pub mod callback;
pub mod child;
pub mod component;
pub mod error;
pub mod factory;
pub mod node;
pub mod props;
pub mod reconcile;
pub mod render;

pub use callback::Callback;
pub use child::{Child, IntoChild};
pub use component::{Component, ComponentHandle, ComponentNode, ComponentType, Scope};
pub use error::{RenderError, RenderResult};
pub use factory::{Attrs, ElementType, component, create_element};
pub use node::{ElementNode, NodeType, TEXT_NODE_TYPE, TextNode, VNode};
pub use props::{PropValue, Props, props_equivalent};
pub use reconcile::{is_same_node, is_same_tree, reconcile};
pub use render::{MountMode, RenderOptions, Renderer, Root, render, render_with};
