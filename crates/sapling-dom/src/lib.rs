//! Sapling DOM - host tree interface
//!
//! This crate defines the narrow set of host-tree capabilities the Sapling
//! renderer consumes, plus an in-memory document implementing them.
//!
//! ## Modules
//!
//! - [`host`]: the [`Host`] trait and the shared [`HostHandle`]
//! - [`point`]: [`InsertionPoint`] spans addressing children of a parent
//! - [`event`]: [`Event`] payloads and listener callbacks
//! - [`document`]: the arena-backed [`Document`] host with a mutation journal
//! - [`error`]: [`HostError`]
//!
//! ## Example
//!
//! ```
//! use sapling_dom::{Document, Host, InsertionPoint};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let text = doc.create_text("hello").unwrap();
//! doc.insert(InsertionPoint::start_of(body), text).unwrap();
//! assert_eq!(doc.inner_html(body).unwrap(), "hello");
//! ```

#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod event;
pub mod host;
pub mod node;
pub mod point;

pub use document::{Document, Mutation};
pub use error::{HostError, HostResult};
pub use event::{Event, EventHandler, Listener};
pub use host::{Host, HostHandle};
pub use node::NodeId;
pub use point::InsertionPoint;
