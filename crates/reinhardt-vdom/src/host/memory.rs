//! Headless in-memory host.
//!
//! [`MemoryDocument`] builds a tree of [`MemoryNode`] handles that behaves like
//! a small subset of the browser DOM: attributes, free-form properties, inline
//! style, listener properties and parent/child links. It is used by the test
//! suite and by tooling that needs to reconcile without a browser, and can
//! serialize itself back to HTML with [`MemoryNode::to_html`].
//!
//! ## Example
//!
//! ```
//! use reinhardt_vdom::host::memory::MemoryDocument;
//! use reinhardt_vdom::host::{Document, HostNode};
//!
//! let document = MemoryDocument::new();
//! let div = document.create_element("div").unwrap();
//! div.set_attribute("id", "app").unwrap();
//! div.append_child(&document.create_text_node("hi"));
//!
//! assert_eq!(div.to_html(), r#"<div id="app">hi</div>"#);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use crate::callback::{Event, EventHandler, NodeCallback};
use crate::error::{HostError, HostResult};
use crate::host::{Document, HostNode};
use crate::util::{html_escape, is_valid_name, is_void_element};
use crate::value::{PropValue, StyleMap};

/// Properties rejected by [`HostNode::set_property`] unless overridden.
pub const DEFAULT_READ_ONLY_PROPERTIES: &[&str] = &[
	"tagName",
	"nodeName",
	"nodeType",
	"namespaceURI",
	"parentNode",
	"childNodes",
];

/// Node factory for the in-memory host.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
	read_only: Rc<HashSet<String>>,
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::with_read_only_properties(DEFAULT_READ_ONLY_PROPERTIES.iter().copied())
	}
}

impl MemoryDocument {
	/// Creates a document with the default read-only property set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a document whose nodes reject assignment to `names`.
	pub fn with_read_only_properties<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			read_only: Rc::new(names.into_iter().map(Into::into).collect()),
		}
	}

	fn create(&self, kind: NodeKind) -> MemoryNode {
		MemoryNode(Rc::new(RefCell::new(NodeData {
			kind,
			parent: Weak::new(),
			children: Vec::new(),
			attributes: Vec::new(),
			properties: HashMap::new(),
			style: StyleMap::new(),
			listeners: HashMap::new(),
			node_ref: None,
			inner_html: None,
			read_only: Rc::clone(&self.read_only),
		})))
	}

	fn create_in(&self, namespace: Option<&str>, tag: &str) -> HostResult<MemoryNode> {
		if !is_valid_name(tag) {
			return Err(HostError::InvalidName(tag.to_string()));
		}
		Ok(self.create(NodeKind::Element {
			tag: tag.to_string(),
			namespace: namespace.map(str::to_string),
		}))
	}
}

impl Document for MemoryDocument {
	type Node = MemoryNode;

	fn create_element(&self, tag: &str) -> HostResult<MemoryNode> {
		self.create_in(None, tag)
	}

	fn create_element_ns(&self, namespace: &str, tag: &str) -> HostResult<MemoryNode> {
		self.create_in(Some(namespace), tag)
	}

	fn create_text_node(&self, text: &str) -> MemoryNode {
		self.create(NodeKind::Text(text.to_string()))
	}
}

#[derive(Debug)]
enum NodeKind {
	Element {
		tag: String,
		namespace: Option<String>,
	},
	Text(String),
}

struct NodeData {
	kind: NodeKind,
	parent: Weak<RefCell<NodeData>>,
	children: Vec<MemoryNode>,
	attributes: Vec<(String, String)>,
	properties: HashMap<String, PropValue<MemoryNode>>,
	style: StyleMap,
	listeners: HashMap<String, EventHandler<MemoryNode>>,
	node_ref: Option<NodeCallback<MemoryNode>>,
	inner_html: Option<String>,
	read_only: Rc<HashSet<String>>,
}

/// A shared handle to an in-memory node.
///
/// Clones refer to the same node; equality is identity.
#[derive(Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

impl MemoryNode {
	/// Tag name of an element node.
	pub fn tag_name(&self) -> Option<String> {
		match &self.0.borrow().kind {
			NodeKind::Element { tag, .. } => Some(tag.clone()),
			NodeKind::Text(_) => None,
		}
	}

	/// Returns true for text nodes.
	pub fn is_text(&self) -> bool {
		matches!(self.0.borrow().kind, NodeKind::Text(_))
	}

	/// Data of a text node.
	pub fn text(&self) -> Option<String> {
		match &self.0.borrow().kind {
			NodeKind::Text(text) => Some(text.clone()),
			NodeKind::Element { .. } => None,
		}
	}

	/// Child handles in document order.
	pub fn children(&self) -> Vec<MemoryNode> {
		self.0.borrow().children.clone()
	}

	/// Number of children.
	pub fn child_count(&self) -> usize {
		self.0.borrow().children.len()
	}

	/// Concatenated text of all descendant text nodes.
	pub fn text_content(&self) -> String {
		let data = self.0.borrow();
		match &data.kind {
			NodeKind::Text(text) => text.clone(),
			NodeKind::Element { .. } => data
				.children
				.iter()
				.map(MemoryNode::text_content)
				.collect(),
		}
	}

	/// Attributes in insertion order.
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.0.borrow().attributes.clone()
	}

	/// Current value of the class list.
	pub fn class_name(&self) -> String {
		self.attribute("class").unwrap_or_default()
	}

	/// Raw markup assigned through [`HostNode::set_inner_html`].
	pub fn inner_html(&self) -> Option<String> {
		self.0.borrow().inner_html.clone()
	}

	/// The listener installed for `event`.
	pub fn listener(&self, event: &str) -> Option<EventHandler<MemoryNode>> {
		self.0.borrow().listeners.get(event).cloned()
	}

	/// Whether a listener is installed for `event`.
	pub fn has_listener(&self, event: &str) -> bool {
		self.0.borrow().listeners.contains_key(event)
	}

	/// The attached ref callback.
	pub fn node_ref(&self) -> Option<NodeCallback<MemoryNode>> {
		self.0.borrow().node_ref.clone()
	}

	/// Fires `event` at this node.
	///
	/// Returns the dispatched event when a listener ran, so callers can
	/// inspect it (for example [`Event::is_default_prevented`]).
	pub fn dispatch(&self, event: &str) -> Option<Event<MemoryNode>> {
		let handler = self.listener(event)?;
		let event = Event::new(event, self.clone());
		handler.call(&event);
		Some(event)
	}

	/// Serializes the subtree as HTML.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		let data = self.0.borrow();
		let tag = match &data.kind {
			NodeKind::Text(text) => {
				out.push_str(&html_escape(text));
				return;
			}
			NodeKind::Element { tag, .. } => tag,
		};

		out.push('<');
		out.push_str(tag);
		for (name, value) in &data.attributes {
			out.push_str(&format!(" {}=\"{}\"", name, html_escape(value)));
		}
		let css = data.style.to_css_text();
		if !css.is_empty() && !data.attributes.iter().any(|(name, _)| name == "style") {
			out.push_str(&format!(" style=\"{}\"", html_escape(&css)));
		}

		if is_void_element(tag) && data.children.is_empty() && data.inner_html.is_none() {
			out.push_str(" />");
			return;
		}

		out.push('>');
		if let Some(html) = &data.inner_html {
			out.push_str(html);
		}
		for child in &data.children {
			child.write_html(out);
		}
		out.push_str(&format!("</{}>", tag));
	}

	/// Whether `ancestor` is this node or one of its ancestors.
	fn is_inclusive_descendant_of(&self, ancestor: &MemoryNode) -> bool {
		let mut current = Some(self.clone());
		while let Some(node) = current {
			if &node == ancestor {
				return true;
			}
			current = node.parent_node();
		}
		false
	}

	fn is_element(&self) -> bool {
		matches!(self.0.borrow().kind, NodeKind::Element { .. })
	}

	fn reflected_property(&self, name: &str) -> Option<PropValue<MemoryNode>> {
		if name == "className" && self.is_element() {
			return Some(PropValue::from(self.class_name()));
		}
		let data = self.0.borrow();
		let value = match (name, &data.kind) {
			("tagName" | "nodeName", NodeKind::Element { tag, .. }) => {
				PropValue::from(tag.to_uppercase())
			}
			("nodeName", NodeKind::Text(_)) => PropValue::from("#text"),
			("nodeType", NodeKind::Element { .. }) => PropValue::Number(1.0),
			("nodeType", NodeKind::Text(_)) => PropValue::Number(3.0),
			("namespaceURI", NodeKind::Element { namespace, .. }) => {
				PropValue::from(namespace.clone())
			}
			_ => return None,
		};
		Some(value)
	}
}

impl HostNode for MemoryNode {
	fn append_child(&self, child: &Self) {
		if self.is_inclusive_descendant_of(child) {
			tracing::warn!(?child, "refusing to append a node to its own subtree");
			return;
		}
		if let Some(previous) = child.parent_node() {
			let _ = previous.remove_child(child);
		}
		child.0.borrow_mut().parent = Rc::downgrade(&self.0);
		self.0.borrow_mut().children.push(child.clone());
	}

	fn remove_child(&self, child: &Self) -> HostResult<()> {
		let removed = {
			let mut data = self.0.borrow_mut();
			let index = data
				.children
				.iter()
				.position(|c| c == child)
				.ok_or(HostError::NotAChild)?;
			data.children.remove(index)
		};
		removed.0.borrow_mut().parent = Weak::new();
		Ok(())
	}

	fn parent_node(&self) -> Option<Self> {
		self.0.borrow().parent.upgrade().map(MemoryNode)
	}

	fn namespace_uri(&self) -> Option<String> {
		match &self.0.borrow().kind {
			NodeKind::Element { namespace, .. } => namespace.clone(),
			NodeKind::Text(_) => None,
		}
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.0
			.borrow()
			.attributes
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.clone())
	}

	fn set_attribute(&self, name: &str, value: &str) -> HostResult<()> {
		if !self.is_element() {
			return Err(HostError::NotAnElement);
		}
		if !is_valid_name(name) {
			return Err(HostError::InvalidName(name.to_string()));
		}
		let mut data = self.0.borrow_mut();
		match data.attributes.iter_mut().find(|(n, _)| n == name) {
			Some(entry) => entry.1 = value.to_string(),
			None => data.attributes.push((name.to_string(), value.to_string())),
		}
		Ok(())
	}

	fn remove_attribute(&self, name: &str) {
		self.0.borrow_mut().attributes.retain(|(n, _)| n != name);
	}

	fn property(&self, name: &str) -> Option<PropValue<Self>> {
		if let Some(value) = self.reflected_property(name) {
			return Some(value);
		}
		self.0.borrow().properties.get(name).cloned()
	}

	fn set_property(&self, name: &str, value: &PropValue<Self>) -> HostResult<()> {
		if self.0.borrow().read_only.contains(name) {
			return Err(HostError::ReadOnlyProperty(name.to_string()));
		}
		if name == "className" {
			let class_name = value.to_attr_string().unwrap_or_default().into_owned();
			self.set_class_name(&class_name);
			return Ok(());
		}
		self.0
			.borrow_mut()
			.properties
			.insert(name.to_string(), value.clone());
		Ok(())
	}

	fn set_class_name(&self, class_name: &str) {
		// Text nodes have no class list.
		let _ = self.set_attribute("class", class_name);
	}

	fn style_property(&self, name: &str) -> Option<String> {
		self.0.borrow().style.get(name).map(str::to_string)
	}

	fn set_style_property(&self, name: &str, value: &str) {
		let mut data = self.0.borrow_mut();
		if value.is_empty() {
			data.style.remove(name);
		} else {
			data.style.set(name.to_string(), value.to_string());
		}
	}

	fn set_inner_html(&self, html: &str) {
		if !self.is_element() {
			return;
		}
		let detached = {
			let mut data = self.0.borrow_mut();
			data.inner_html = Some(html.to_string());
			std::mem::take(&mut data.children)
		};
		for child in detached {
			child.0.borrow_mut().parent = Weak::new();
		}
	}

	fn set_event_listener(&self, event: &str, handler: Option<EventHandler<Self>>) {
		let mut data = self.0.borrow_mut();
		match handler {
			Some(handler) => {
				data.listeners.insert(event.to_string(), handler);
			}
			None => {
				data.listeners.remove(event);
			}
		}
	}

	fn has_node_ref(&self) -> bool {
		self.0.borrow().node_ref.is_some()
	}

	fn attach_node_ref(&self, callback: NodeCallback<Self>) {
		self.0.borrow_mut().node_ref = Some(callback);
	}
}

impl PartialEq for MemoryNode {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl Eq for MemoryNode {}

impl std::fmt::Debug for MemoryNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let data = self.0.borrow();
		match &data.kind {
			NodeKind::Text(text) => f.debug_tuple("MemoryNode::Text").field(text).finish(),
			NodeKind::Element { tag, namespace } => f
				.debug_struct("MemoryNode::Element")
				.field("tag", tag)
				.field("namespace", namespace)
				.field("attributes", &data.attributes)
				.field("children", &data.children.len())
				.finish(),
		}
	}
}
