//! Host tree interface
//!
//! This module provides access to sapling-dom: the [`Host`] trait the
//! renderer consumes, [`InsertionPoint`] spans, event dispatch through
//! [`HostHandle`], and the in-memory [`Document`] with its mutation journal.

// Re-export all sapling-dom functionality
pub use sapling_dom::*;
