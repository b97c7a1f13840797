//! Component System for Sapling
//!
//! Components are user types implementing [`Component`]. Each component node
//! in a tree owns a live instance holding the component value, its state and
//! the output it rendered last. Updates re-render the component and reconcile
//! the new output against the cached one.
//!
//! ## Lifecycle
//!
//! - construction through [`Default`], with empty props, children and state
//! - `set_attribute` / `append_child` while the parent builds the tree
//! - `mount_to` records the insertion point, then performs the first update
//! - every later update reconciles against the cached output
//!
//! ## Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use sapling_dom::{Document, HostHandle};
//! use sapling_vdom::{Component, RenderResult, Scope, VNode, component, h, render};
//! use serde_json::{Value, json};
//!
//! #[derive(Default)]
//! struct Counter;
//!
//! impl Component for Counter {
//!     type State = Value;
//!
//!     fn render(&self, scope: &Scope<'_, Self>) -> RenderResult<VNode> {
//!         let count = scope.state().and_then(|s| s["count"].as_i64()).unwrap_or(0);
//!         Ok(h!("span", count))
//!     }
//! }
//!
//! let doc = Rc::new(RefCell::new(Document::new()));
//! let body = doc.borrow().body();
//! let host = HostHandle::from_shared(doc.clone());
//!
//! let root = render(h!(component::<Counter>()), body, &host).unwrap();
//! root.handle::<Counter>().unwrap().set_state(json!({"count": 2})).unwrap();
//! assert_eq!(doc.borrow().inner_html(body).unwrap(), "<span>2</span>");
//! ```

mod handle;
mod instance;
mod state;
mod r#trait;

pub use handle::{ComponentHandle, Scope};
pub use instance::ComponentNode;
pub use state::deep_merge;
pub use r#trait::{Component, ComponentType};
