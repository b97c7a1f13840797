//! Shared test harness: an in-memory document behind a host handle.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sapling_dom::{Document, HostHandle, Mutation, NodeId};

pub struct Harness {
	pub doc: Rc<RefCell<Document>>,
	pub host: HostHandle,
	pub body: NodeId,
}

impl Harness {
	pub fn new() -> Self {
		let doc = Rc::new(RefCell::new(Document::new()));
		let body = doc.borrow().body();
		let host = HostHandle::from_shared(doc.clone());
		Self { doc, host, body }
	}

	pub fn html(&self) -> String {
		self.doc.borrow().inner_html(self.body).unwrap()
	}

	pub fn take_mutations(&self) -> Vec<Mutation> {
		self.doc.borrow_mut().take_mutations()
	}

	pub fn clear_mutations(&self) {
		self.doc.borrow_mut().clear_mutations();
	}

	/// Depth-first search for the first element with `tag` under the body.
	pub fn find(&self, tag: &str) -> Option<NodeId> {
		self.find_all(tag).into_iter().next()
	}

	/// Every element with `tag` under the body, in document order.
	pub fn find_all(&self, tag: &str) -> Vec<NodeId> {
		let doc = self.doc.borrow();
		let mut found = Vec::new();
		let mut stack = vec![self.body];
		while let Some(node) = stack.pop() {
			if node != self.body && doc.tag_name(node).unwrap() == Some(tag) {
				found.push(node);
			}
			let children = doc.children(node).unwrap();
			stack.extend(children.iter().rev().copied());
		}
		found
	}

	/// Dispatches `event` on the first element with `tag`.
	pub fn fire(&self, tag: &str, event: &str) -> usize {
		let target = self.find(tag).unwrap();
		self.host.dispatch(target, event).unwrap()
	}
}

pub fn count(mutations: &[Mutation], pred: impl Fn(&Mutation) -> bool) -> usize {
	mutations.iter().filter(|m| pred(m)).count()
}
