//! Facade integration tests
//!
//! Success Criteria:
//! 1. The prelude is enough to build, render and update a component tree
//! 2. Macros re-exported from the facade expand against the vdom crate

use std::cell::RefCell;
use std::rc::Rc;

use rstest::*;
use sapling::prelude::*;
use serde_json::json;

#[derive(Default)]
struct Greeting;

impl Component for Greeting {
	type State = serde_json::Value;

	fn render(&self, scope: &Scope<'_, Self>) -> RenderResult<VNode> {
		let name = scope
			.state()
			.and_then(|state| state["name"].as_str())
			.or_else(|| scope.prop_str("name"))
			.unwrap_or("world")
			.to_string();
		Ok(h!("p", { "className" => "greeting" }, "Hello, ", name, "!"))
	}
}

#[fixture]
fn document() -> (Rc<RefCell<Document>>, HostHandle, NodeId) {
	let doc = Rc::new(RefCell::new(Document::new()));
	let body = doc.borrow().body();
	let host = HostHandle::from_shared(doc.clone());
	(doc, host, body)
}

#[rstest]
fn test_prelude_renders_component(document: (Rc<RefCell<Document>>, HostHandle, NodeId)) {
	let (doc, host, body) = document;
	let root = render(
		h!(component::<Greeting>(), { "name" => "Sapling" }),
		body,
		&host,
	)
	.unwrap();

	assert_eq!(
		doc.borrow().inner_html(body).unwrap(),
		"<p class=\"greeting\">Hello, Sapling!</p>"
	);

	root.handle::<Greeting>()
		.unwrap()
		.set_state(json!({ "name": "again" }))
		.unwrap();
	assert_eq!(
		doc.borrow().text_content(body).unwrap(),
		"Hello, again!"
	);
}

#[rstest]
fn test_facade_attrs_macro(document: (Rc<RefCell<Document>>, HostHandle, NodeId)) {
	let (doc, host, body) = document;
	let options = RenderOptions::new().mount_mode(MountMode::Append);
	render_with(
		create_element("input", attrs! { "type" => "checkbox", "checked" => true }, ()),
		body,
		&host,
		&options,
	)
	.unwrap();

	assert_eq!(
		doc.borrow().inner_html(body).unwrap(),
		"<input checked=\"true\" type=\"checkbox\" />"
	);
}
