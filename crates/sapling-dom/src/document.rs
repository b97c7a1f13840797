//! In-memory host document.
//!
//! [`Document`] is an arena-backed [`Host`] that keeps a journal of every
//! write made through the host interface. It backs native rendering and is
//! what the test suites inspect to count mutations and read back markup.
//!
//! Cleared nodes stay in the arena, detached but still queryable, until
//! [`Document::collect_detached`] frees everything no container can reach.
//! Freed ids are never reissued.

use std::borrow::Cow;

use crate::error::{HostError, HostResult};
use crate::event::{EventHandler, Listener};
use crate::host::Host;
use crate::node::NodeId;
use crate::point::InsertionPoint;

/// A write performed through the [`Host`] interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
	/// An element was created.
	CreateElement {
		/// The new node.
		node: NodeId,
		/// Its tag name.
		tag: String,
	},
	/// A text node was created.
	CreateText {
		/// The new node.
		node: NodeId,
		/// Its content.
		content: String,
	},
	/// An attribute was set.
	SetAttribute {
		/// The element.
		node: NodeId,
		/// Attribute name.
		name: String,
		/// Attribute value.
		value: String,
	},
	/// A listener was attached.
	AddListener {
		/// The element.
		node: NodeId,
		/// Event name.
		event: String,
	},
	/// Children were removed.
	Clear {
		/// The cleared point.
		point: InsertionPoint,
		/// The detached children, in document order.
		removed: Vec<NodeId>,
	},
	/// A node was inserted.
	Insert {
		/// The point the node now occupies.
		point: InsertionPoint,
		/// The inserted node.
		node: NodeId,
	},
}

#[derive(Debug)]
enum NodeKind {
	Element {
		tag: String,
		attributes: Vec<(String, String)>,
	},
	Text(String),
}

#[derive(Debug)]
struct NodeData {
	kind: NodeKind,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	listeners: Vec<Listener>,
}

impl NodeData {
	fn new(kind: NodeKind) -> Self {
		Self {
			kind,
			parent: None,
			children: Vec::new(),
			listeners: Vec::new(),
		}
	}
}

/// Arena-backed host document.
#[derive(Debug)]
pub struct Document {
	nodes: Vec<Option<NodeData>>,
	containers: Vec<NodeId>,
	body: NodeId,
	journal: Vec<Mutation>,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates a document with an empty `body` container.
	pub fn new() -> Self {
		let mut doc = Self {
			nodes: Vec::new(),
			containers: Vec::new(),
			body: NodeId::from_raw(0),
			journal: Vec::new(),
		};
		doc.body = doc.create_container("body");
		doc
	}

	/// The `body` container created with the document.
	pub fn body(&self) -> NodeId {
		self.body
	}

	/// Creates a detached container element without journaling it.
	///
	/// Containers and everything attached beneath them survive
	/// [`collect_detached`](Self::collect_detached).
	pub fn create_container(&mut self, tag: &str) -> NodeId {
		let node = self.alloc_element(tag);
		self.containers.push(node);
		node
	}

	/// Number of nodes held by the arena, attached or not.
	pub fn node_count(&self) -> usize {
		self.nodes.iter().filter(|slot| slot.is_some()).count()
	}

	/// Frees every node that is not a container or a descendant of one, and
	/// returns how many were freed.
	///
	/// Nodes created but not yet inserted are freed too, so call this between
	/// renders rather than from inside one. Freed ids report
	/// [`HostError::NodeNotFound`] afterwards.
	pub fn collect_detached(&mut self) -> usize {
		let mut reachable = vec![false; self.nodes.len()];
		let mut stack = self.containers.clone();
		while let Some(node) = stack.pop() {
			let Some(seen) = reachable.get_mut(node.raw()) else {
				continue;
			};
			if std::mem::replace(seen, true) {
				continue;
			}
			if let Some(Some(data)) = self.nodes.get(node.raw()) {
				stack.extend(data.children.iter().copied());
			}
		}

		let mut freed = 0;
		for (slot, keep) in self.nodes.iter_mut().zip(reachable) {
			if !keep && slot.take().is_some() {
				freed += 1;
			}
		}
		tracing::debug!(freed, live = self.node_count(), "collected detached nodes");
		freed
	}

	/// Every write made through [`Host`] since the last reset.
	pub fn mutations(&self) -> &[Mutation] {
		&self.journal
	}

	/// Drains the journal.
	pub fn take_mutations(&mut self) -> Vec<Mutation> {
		std::mem::take(&mut self.journal)
	}

	/// Empties the journal.
	pub fn clear_mutations(&mut self) {
		self.journal.clear();
	}

	/// Children of `node`.
	pub fn children(&self, node: NodeId) -> HostResult<&[NodeId]> {
		Ok(&self.get(node)?.children)
	}

	/// Parent of `node`, if attached.
	pub fn parent(&self, node: NodeId) -> HostResult<Option<NodeId>> {
		Ok(self.get(node)?.parent)
	}

	/// Tag name of an element, `None` for text.
	pub fn tag_name(&self, node: NodeId) -> HostResult<Option<&str>> {
		Ok(match &self.get(node)?.kind {
			NodeKind::Element { tag, .. } => Some(tag.as_str()),
			NodeKind::Text(_) => None,
		})
	}

	/// Content of a text node, `None` for elements.
	pub fn text(&self, node: NodeId) -> HostResult<Option<&str>> {
		Ok(match &self.get(node)?.kind {
			NodeKind::Text(content) => Some(content.as_str()),
			NodeKind::Element { .. } => None,
		})
	}

	/// Value of attribute `name` on an element.
	pub fn attribute(&self, node: NodeId, name: &str) -> HostResult<Option<&str>> {
		Ok(self
			.attributes(node)?
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str()))
	}

	/// All attributes of an element in the order they were first set.
	pub fn attributes(&self, node: NodeId) -> HostResult<&[(String, String)]> {
		match &self.get(node)?.kind {
			NodeKind::Element { attributes, .. } => Ok(attributes),
			NodeKind::Text(_) => Err(HostError::NotAnElement(node)),
		}
	}

	/// Event names with at least one listener on `node`.
	pub fn listened_events(&self, node: NodeId) -> HostResult<Vec<&str>> {
		let mut events: Vec<&str> = Vec::new();
		for listener in &self.get(node)?.listeners {
			if !events.contains(&listener.event.as_str()) {
				events.push(&listener.event);
			}
		}
		Ok(events)
	}

	/// Concatenated text of `node` and its descendants in document order.
	pub fn text_content(&self, node: NodeId) -> HostResult<String> {
		let mut output = String::new();
		self.collect_text(node, &mut output)?;
		Ok(output)
	}

	/// Markup of `node` including the node itself.
	pub fn outer_html(&self, node: NodeId) -> HostResult<String> {
		let mut output = String::new();
		self.write_html(node, &mut output)?;
		Ok(output)
	}

	/// Markup of the children of `node`.
	pub fn inner_html(&self, node: NodeId) -> HostResult<String> {
		let mut output = String::new();
		for &child in &self.get(node)?.children {
			self.write_html(child, &mut output)?;
		}
		Ok(output)
	}

	fn alloc(&mut self, kind: NodeKind) -> NodeId {
		let id = NodeId::from_raw(self.nodes.len());
		self.nodes.push(Some(NodeData::new(kind)));
		id
	}

	fn alloc_element(&mut self, tag: &str) -> NodeId {
		self.alloc(NodeKind::Element {
			tag: tag.to_string(),
			attributes: Vec::new(),
		})
	}

	fn get(&self, node: NodeId) -> HostResult<&NodeData> {
		self.nodes
			.get(node.raw())
			.and_then(Option::as_ref)
			.ok_or(HostError::NodeNotFound(node))
	}

	fn get_mut(&mut self, node: NodeId) -> HostResult<&mut NodeData> {
		self.nodes
			.get_mut(node.raw())
			.and_then(Option::as_mut)
			.ok_or(HostError::NodeNotFound(node))
	}

	fn element_mut(&mut self, node: NodeId) -> HostResult<&mut NodeData> {
		let data = self.get_mut(node)?;
		match data.kind {
			NodeKind::Element { .. } => Ok(data),
			NodeKind::Text(_) => Err(HostError::NotAnElement(node)),
		}
	}

	fn collect_text(&self, node: NodeId, output: &mut String) -> HostResult<()> {
		let data = self.get(node)?;
		match &data.kind {
			NodeKind::Text(content) => output.push_str(content),
			NodeKind::Element { .. } => {
				for &child in &data.children {
					self.collect_text(child, output)?;
				}
			}
		}
		Ok(())
	}

	fn write_html(&self, node: NodeId, output: &mut String) -> HostResult<()> {
		let data = self.get(node)?;
		match &data.kind {
			NodeKind::Text(content) => output.push_str(&html_escape(content)),
			NodeKind::Element { tag, attributes } => {
				output.push('<');
				output.push_str(tag);
				for (name, value) in attributes {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if is_void_element(tag) && data.children.is_empty() {
					output.push_str(" />");
				} else {
					output.push('>');
					for &child in &data.children {
						self.write_html(child, output)?;
					}
					output.push_str("</");
					output.push_str(tag);
					output.push('>');
				}
			}
		}
		Ok(())
	}
}

impl Host for Document {
	fn create_element(&mut self, tag: &str) -> HostResult<NodeId> {
		let node = self.alloc_element(tag);
		tracing::trace!(%node, tag, "create element");
		self.journal.push(Mutation::CreateElement {
			node,
			tag: tag.to_string(),
		});
		Ok(node)
	}

	fn create_text(&mut self, content: &str) -> HostResult<NodeId> {
		let node = self.alloc(NodeKind::Text(content.to_string()));
		tracing::trace!(%node, "create text");
		self.journal.push(Mutation::CreateText {
			node,
			content: content.to_string(),
		});
		Ok(node)
	}

	fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> HostResult<()> {
		let data = self.element_mut(element)?;
		if let NodeKind::Element { attributes, .. } = &mut data.kind {
			match attributes.iter_mut().find(|(key, _)| key == name) {
				Some((_, existing)) => *existing = value.to_string(),
				None => attributes.push((name.to_string(), value.to_string())),
			}
		}
		tracing::trace!(node = %element, name, "set attribute");
		self.journal.push(Mutation::SetAttribute {
			node: element,
			name: name.to_string(),
			value: value.to_string(),
		});
		Ok(())
	}

	fn add_event_listener(
		&mut self,
		element: NodeId,
		event: &str,
		handler: EventHandler,
	) -> HostResult<()> {
		self.element_mut(element)?
			.listeners
			.push(Listener::new(event, handler));
		tracing::trace!(node = %element, event, "add listener");
		self.journal.push(Mutation::AddListener {
			node: element,
			event: event.to_string(),
		});
		Ok(())
	}

	fn child_count(&self, node: NodeId) -> HostResult<usize> {
		Ok(self.get(node)?.children.len())
	}

	fn child_at(&self, node: NodeId, index: usize) -> HostResult<Option<NodeId>> {
		Ok(self.get(node)?.children.get(index).copied())
	}

	fn position_of(&self, node: NodeId) -> HostResult<(NodeId, usize)> {
		let parent = self.get(node)?.parent.ok_or(HostError::Detached(node))?;
		let index = self
			.get(parent)?
			.children
			.iter()
			.position(|&child| child == node)
			.ok_or(HostError::Detached(node))?;
		Ok((parent, index))
	}

	fn clear(&mut self, point: InsertionPoint) -> HostResult<InsertionPoint> {
		let parent = self.get_mut(point.parent())?;
		let len = parent.children.len();
		if point.end() > len {
			return Err(HostError::InvalidPoint { point, len });
		}

		let removed: Vec<NodeId> = parent.children.drain(point.range()).collect();
		for &child in &removed {
			self.get_mut(child)?.parent = None;
		}

		if !removed.is_empty() {
			tracing::trace!(%point, removed = removed.len(), "clear");
			self.journal.push(Mutation::Clear { point, removed });
		}
		Ok(point.collapse())
	}

	fn insert(&mut self, point: InsertionPoint, node: NodeId) -> HostResult<InsertionPoint> {
		if !point.is_collapsed() {
			return Err(HostError::PointNotCleared(point));
		}
		if self.get(node)?.parent.is_some() {
			return Err(HostError::AlreadyAttached(node));
		}

		let parent = self.element_mut(point.parent())?;
		let len = parent.children.len();
		if point.start() > len {
			return Err(HostError::InvalidPoint { point, len });
		}
		parent.children.insert(point.start(), node);
		self.get_mut(node)?.parent = Some(point.parent());

		let occupied = point.single();
		tracing::trace!(point = %occupied, %node, "insert");
		self.journal.push(Mutation::Insert {
			point: occupied,
			node,
		});
		Ok(occupied)
	}

	fn listeners(&self, node: NodeId, event: &str) -> HostResult<Vec<EventHandler>> {
		Ok(self
			.get(node)?
			.listeners
			.iter()
			.filter(|listener| listener.event == event)
			.map(|listener| listener.handler.clone())
			.collect())
	}
}

fn is_void_element(tag: &str) -> bool {
	matches!(
		tag,
		"area"
			| "base" | "br"
			| "col" | "embed"
			| "hr" | "img"
			| "input" | "link"
			| "meta" | "source"
			| "track" | "wbr"
	)
}

/// Escapes HTML special characters.
fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use std::rc::Rc;

	#[fixture]
	fn doc() -> Document {
		Document::new()
	}

	fn append(doc: &mut Document, parent: NodeId, node: NodeId) -> InsertionPoint {
		let at = InsertionPoint::end_of(doc, parent).unwrap();
		doc.insert(at, node).unwrap()
	}

	#[rstest]
	fn test_new_document_has_empty_body(doc: Document) {
		assert_eq!(doc.tag_name(doc.body()).unwrap(), Some("body"));
		assert!(doc.children(doc.body()).unwrap().is_empty());
		assert!(doc.mutations().is_empty());
	}

	#[rstest]
	fn test_insert_returns_occupied_point(mut doc: Document) {
		let body = doc.body();
		let div = doc.create_element("div").unwrap();
		let point = doc.insert(InsertionPoint::start_of(body), div).unwrap();

		assert_eq!(point, InsertionPoint::new(body, 0, 1));
		assert_eq!(doc.parent(div).unwrap(), Some(body));
		assert_eq!(doc.position_of(div).unwrap(), (body, 0));
	}

	#[rstest]
	fn test_insert_requires_cleared_point(mut doc: Document) {
		let body = doc.body();
		let a = doc.create_text("a").unwrap();
		append(&mut doc, body, a);
		let b = doc.create_text("b").unwrap();

		let err = doc.insert(InsertionPoint::new(body, 0, 1), b).unwrap_err();
		assert_eq!(err, HostError::PointNotCleared(InsertionPoint::new(body, 0, 1)));
	}

	#[rstest]
	fn test_insert_attached_node_fails(mut doc: Document) {
		let body = doc.body();
		let a = doc.create_text("a").unwrap();
		append(&mut doc, body, a);

		let err = doc.insert(InsertionPoint::start_of(body), a).unwrap_err();
		assert_eq!(err, HostError::AlreadyAttached(a));
	}

	#[rstest]
	fn test_insert_into_text_fails(mut doc: Document) {
		let text = doc.create_text("leaf").unwrap();
		let other = doc.create_text("other").unwrap();

		let err = doc.insert(InsertionPoint::start_of(text), other).unwrap_err();
		assert_eq!(err, HostError::NotAnElement(text));
	}

	#[rstest]
	fn test_clear_detaches_span(mut doc: Document) {
		let body = doc.body();
		let nodes: Vec<NodeId> = ["a", "b", "c"]
			.into_iter()
			.map(|t| {
				let node = doc.create_text(t).unwrap();
				append(&mut doc, body, node);
				node
			})
			.collect();
		doc.clear_mutations();

		let collapsed = doc.clear(InsertionPoint::new(body, 0, 2)).unwrap();
		assert_eq!(collapsed, InsertionPoint::new(body, 0, 0));
		assert_eq!(doc.children(body).unwrap(), &[nodes[2]]);
		assert_eq!(doc.parent(nodes[0]).unwrap(), None);
		assert_eq!(
			doc.mutations(),
			&[Mutation::Clear {
				point: InsertionPoint::new(body, 0, 2),
				removed: vec![nodes[0], nodes[1]],
			}]
		);
	}

	#[rstest]
	fn test_clear_empty_point_is_not_journaled(mut doc: Document) {
		let body = doc.body();
		doc.clear(InsertionPoint::start_of(body)).unwrap();
		assert!(doc.mutations().is_empty());
	}

	#[rstest]
	fn test_clear_out_of_range(mut doc: Document) {
		let body = doc.body();
		let err = doc.clear(InsertionPoint::new(body, 0, 3)).unwrap_err();
		assert!(matches!(err, HostError::InvalidPoint { len: 0, .. }));
	}

	#[rstest]
	fn test_set_attribute_overwrites(mut doc: Document) {
		let div = doc.create_element("div").unwrap();
		doc.set_attribute(div, "class", "a").unwrap();
		doc.set_attribute(div, "id", "main").unwrap();
		doc.set_attribute(div, "class", "b").unwrap();

		assert_eq!(doc.attribute(div, "class").unwrap(), Some("b"));
		assert_eq!(
			doc.attributes(div).unwrap(),
			&[
				("class".to_string(), "b".to_string()),
				("id".to_string(), "main".to_string())
			]
		);
	}

	#[rstest]
	fn test_set_attribute_on_text_fails(mut doc: Document) {
		let text = doc.create_text("x").unwrap();
		assert_eq!(
			doc.set_attribute(text, "class", "a").unwrap_err(),
			HostError::NotAnElement(text)
		);
	}

	#[rstest]
	fn test_unknown_node(doc: Document) {
		let ghost = NodeId::from_raw(999);
		assert_eq!(
			doc.child_count(ghost).unwrap_err(),
			HostError::NodeNotFound(ghost)
		);
	}

	#[rstest]
	fn test_listeners_filtered_by_event(mut doc: Document) {
		let button = doc.create_element("button").unwrap();
		doc.add_event_listener(button, "click", Rc::new(|_: &crate::Event| {}))
			.unwrap();
		doc.add_event_listener(button, "keydown", Rc::new(|_: &crate::Event| {}))
			.unwrap();

		assert_eq!(doc.listeners(button, "click").unwrap().len(), 1);
		assert_eq!(doc.listened_events(button).unwrap(), vec!["click", "keydown"]);
	}

	#[rstest]
	fn test_html_serialization(mut doc: Document) {
		let body = doc.body();
		let div = doc.create_element("div").unwrap();
		doc.set_attribute(div, "title", "a \"quote\"").unwrap();
		append(&mut doc, body, div);
		let text = doc.create_text("<b>&").unwrap();
		append(&mut doc, div, text);
		let br = doc.create_element("br").unwrap();
		append(&mut doc, div, br);

		assert_eq!(
			doc.inner_html(body).unwrap(),
			"<div title=\"a &quot;quote&quot;\">&lt;b&gt;&amp;<br /></div>"
		);
		assert_eq!(doc.text_content(body).unwrap(), "<b>&");
	}

	#[rstest]
	fn test_collect_detached_frees_cleared_subtrees(mut doc: Document) {
		let body = doc.body();
		let baseline = doc.node_count();
		let div = doc.create_element("div").unwrap();
		append(&mut doc, body, div);
		let text = doc.create_text("x").unwrap();
		append(&mut doc, div, text);
		let everything = InsertionPoint::spanning(&doc, body).unwrap();
		doc.clear(everything).unwrap();

		assert_eq!(doc.node_count(), baseline + 2);
		assert_eq!(doc.parent(div).unwrap(), None);

		assert_eq!(doc.collect_detached(), 2);
		assert_eq!(doc.node_count(), baseline);
		assert_eq!(doc.children(div).unwrap_err(), HostError::NodeNotFound(div));
		assert_eq!(doc.text(text).unwrap_err(), HostError::NodeNotFound(text));
	}

	#[rstest]
	fn test_collect_detached_keeps_containers_and_attached_nodes(mut doc: Document) {
		let body = doc.body();
		let root = doc.create_container("main");
		let kept = doc.create_text("kept").unwrap();
		append(&mut doc, root, kept);
		let p = doc.create_element("p").unwrap();
		append(&mut doc, body, p);
		let stray = doc.create_text("stray").unwrap();

		assert_eq!(doc.collect_detached(), 1);
		assert_eq!(doc.text_content(root).unwrap(), "kept");
		assert_eq!(doc.inner_html(body).unwrap(), "<p></p>");
		assert_eq!(doc.parent(stray).unwrap_err(), HostError::NodeNotFound(stray));
		assert_eq!(doc.collect_detached(), 0);
	}

	#[rstest]
	fn test_freed_ids_are_not_reissued(mut doc: Document) {
		let old = doc.create_text("old").unwrap();
		doc.collect_detached();
		let new = doc.create_text("new").unwrap();

		assert_ne!(old, new);
		assert_eq!(doc.text(new).unwrap(), Some("new"));
		assert!(doc.text(old).is_err());
	}

	mod props {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn clear_keeps_nodes_outside_span(len in 1usize..8, a in 0usize..8, b in 0usize..8) {
				let (start, end) = (a.min(b).min(len), a.max(b).min(len));
				let mut doc = Document::new();
				let body = doc.body();
				let nodes: Vec<NodeId> = (0..len)
					.map(|i| {
						let node = doc.create_text(&i.to_string()).unwrap();
						append(&mut doc, body, node);
						node
					})
					.collect();

				let collapsed = doc.clear(InsertionPoint::new(body, start, end)).unwrap();

				let mut expected = nodes[..start].to_vec();
				expected.extend_from_slice(&nodes[end..]);
				prop_assert_eq!(collapsed, InsertionPoint::new(body, start, start));
				prop_assert_eq!(doc.children(body).unwrap(), expected.as_slice());
			}
		}
	}
}
