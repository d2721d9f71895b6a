//! Virtual node types.
//!
//! A [`VNode`] is an in-memory, declarative description of one element or
//! text fragment. Elements carry their properties and ordered children in a
//! [`Props`] mapping.
//!
//! ## Example
//!
//! ```
//! use reinhardt_vdom::host::memory::MemoryNode;
//! use reinhardt_vdom::vnode::{VElement, VNode};
//!
//! let view: VNode<MemoryNode> = VElement::new("ul")
//!     .class("todo-list")
//!     .child(VElement::new("li").key("a").child("First"))
//!     .child(VElement::new("li").key("b").child("Second"))
//!     .into();
//!
//! assert_eq!(view.to_string(), "FirstSecond");
//! ```

use std::borrow::Cow;

use crate::callback::Event;
use crate::value::{PropValue, RawHtml, StyleMap};

/// Property keys with reserved meaning.
pub mod keys {
	/// Identity hint for the external differ.
	pub const KEY: &str = "key";
	/// Ordered child sequence.
	pub const CHILDREN: &str = "children";
	/// Callback receiving the live node once.
	pub const REF: &str = "ref";
	/// Class list.
	pub const CLASS: &str = "class";
	/// Class list (property spelling).
	pub const CLASS_NAME: &str = "className";
	/// Inline style map.
	pub const STYLE: &str = "style";
	/// Raw markup injection.
	pub const INNER_HTML: &str = "dangerouslySetInnerHTML";
	/// Fired after an element and its subtree are created.
	pub const ON_CREATE: &str = "onCreate";
	/// Fired after an update pass that changed something.
	pub const ON_UPDATE: &str = "onUpdate";
	/// Fired right before an element is detached.
	pub const ON_REMOVE: &str = "onRemove";

	/// Lifecycle hook keys.
	pub const LIFECYCLE: [&str; 3] = [ON_CREATE, ON_UPDATE, ON_REMOVE];
}

/// A virtual node.
pub enum VNode<N> {
	/// A text fragment.
	Text(Cow<'static, str>),
	/// A number rendered as text.
	Number(f64),
	/// A boolean rendered as text.
	Bool(bool),
	/// A structured node.
	Element(VElement<N>),
}

impl<N> VNode<N> {
	/// Creates a text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		VNode::Text(content.into())
	}

	/// Starts building an element node.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> VElement<N> {
		VElement::new(tag)
	}

	/// Returns the element if this is a structured node.
	pub fn as_element(&self) -> Option<&VElement<N>> {
		match self {
			VNode::Element(element) => Some(element),
			_ => None,
		}
	}

	/// Returns the element's properties if this is a structured node.
	pub fn attributes(&self) -> Option<&Props<N>> {
		self.as_element().map(VElement::attributes)
	}
}

/// The string form of a node: primitives format themselves, structured nodes
/// yield the concatenated text of their children.
impl<N> std::fmt::Display for VNode<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			VNode::Text(text) => f.write_str(text),
			VNode::Number(n) => f.write_str(&crate::value::format_number(*n)),
			VNode::Bool(b) => write!(f, "{b}"),
			VNode::Element(element) => {
				for child in element.attributes.children() {
					write!(f, "{child}")?;
				}
				Ok(())
			}
		}
	}
}

impl<N> std::fmt::Debug for VNode<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			VNode::Text(text) => f.debug_tuple("Text").field(text).finish(),
			VNode::Number(n) => f.debug_tuple("Number").field(n).finish(),
			VNode::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			VNode::Element(element) => f.debug_tuple("Element").field(element).finish(),
		}
	}
}

/// A structured virtual node.
///
/// A missing tag marks a text-like node; it is materialized from its string
/// form.
pub struct VElement<N> {
	tag: Option<Cow<'static, str>>,
	attributes: Props<N>,
}

impl<N> std::fmt::Debug for VElement<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("VElement")
			.field("tag", &self.tag)
			.field("attributes", &self.attributes)
			.finish()
	}
}

impl<N> VElement<N> {
	/// Creates an element node.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			tag: Some(tag.into()),
			attributes: Props::new(),
		}
	}

	/// Creates a structured node without a tag.
	pub fn tagless() -> Self {
		Self {
			tag: None,
			attributes: Props::new(),
		}
	}

	/// Sets a property.
	pub fn attr(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<PropValue<N>>) -> Self {
		self.attributes.set(key, value);
		self
	}

	/// Sets the class list.
	pub fn class(self, class: impl Into<Cow<'static, str>>) -> Self {
		self.attr(keys::CLASS, PropValue::Str(class.into()))
	}

	/// Sets the inline style.
	pub fn style(self, style: StyleMap) -> Self {
		self.attr(keys::STYLE, PropValue::Style(style))
	}

	/// Sets the identity key.
	pub fn key(self, key: impl Into<PropValue<N>>) -> Self {
		self.attr(keys::KEY, key)
	}

	/// Installs an event handler; `event` is the lowercase event name.
	///
	/// ```
	/// use reinhardt_vdom::host::memory::MemoryNode;
	/// use reinhardt_vdom::vnode::VElement;
	///
	/// let button: VElement<MemoryNode> = VElement::new("button").on("click", |_| {});
	/// assert!(button.attributes().contains_key("onClick"));
	/// ```
	pub fn on<F>(self, event: &str, handler: F) -> Self
	where
		F: Fn(&Event<N>) + 'static,
	{
		self.attr(event_key(event), PropValue::event(handler))
	}

	/// Sets the ref callback.
	pub fn node_ref<F>(self, callback: F) -> Self
	where
		F: Fn(&N) + 'static,
	{
		self.attr(keys::REF, PropValue::node(callback))
	}

	/// Sets the creation hook.
	pub fn on_create<F>(self, hook: F) -> Self
	where
		F: Fn(&N) + 'static,
	{
		self.attr(keys::ON_CREATE, PropValue::node(hook))
	}

	/// Sets the update hook.
	pub fn on_update<F>(self, hook: F) -> Self
	where
		F: Fn(&N) + 'static,
	{
		self.attr(keys::ON_UPDATE, PropValue::node(hook))
	}

	/// Sets the removal hook.
	pub fn on_remove<F>(self, hook: F) -> Self
	where
		F: Fn(&N) + 'static,
	{
		self.attr(keys::ON_REMOVE, PropValue::node(hook))
	}

	/// Sets raw inner markup. The markup is not sanitized.
	pub fn inner_html(self, html: impl Into<Cow<'static, str>>) -> Self {
		self.attr(keys::INNER_HTML, PropValue::Html(RawHtml::new(html)))
	}

	/// Appends a child.
	pub fn child(mut self, child: impl IntoVNode<N>) -> Self {
		self.attributes.push_child(child.into_vnode());
		self
	}

	/// Appends a child when present.
	pub fn maybe_child(self, child: Option<impl IntoVNode<N>>) -> Self {
		match child {
			Some(child) => self.child(child),
			None => self,
		}
	}

	/// Appends several children.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoVNode<N>>) -> Self {
		for child in children {
			self.attributes.push_child(child.into_vnode());
		}
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> Option<&str> {
		self.tag.as_deref()
	}

	/// Returns the properties.
	pub fn attributes(&self) -> &Props<N> {
		&self.attributes
	}

	/// Returns the properties mutably.
	pub fn attributes_mut(&mut self) -> &mut Props<N> {
		&mut self.attributes
	}

	/// Consumes the element and returns `(tag, attributes)`.
	pub fn into_parts(self) -> (Option<Cow<'static, str>>, Props<N>) {
		(self.tag, self.attributes)
	}
}

/// Builds the `onXxx` key for a lowercase event name.
pub fn event_key(event: &str) -> String {
	let mut chars = event.chars();
	match chars.next() {
		Some(first) => format!("on{}{}", first.to_uppercase(), chars.as_str()),
		None => "on".to_string(),
	}
}

/// Insertion-ordered property mapping plus the ordered child sequence.
///
/// The `children` entry always exists (possibly empty) and is kept apart from
/// the scalar entries.
pub struct Props<N> {
	entries: Vec<(Cow<'static, str>, PropValue<N>)>,
	children: Vec<VNode<N>>,
}

impl<N> Default for Props<N> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			children: Vec::new(),
		}
	}
}

impl<N> std::fmt::Debug for Props<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Props")
			.field("entries", &self.entries)
			.field("children", &self.children)
			.finish()
	}
}

impl<N> Props<N> {
	/// Creates an empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a property (builder form).
	pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<PropValue<N>>) -> Self {
		self.set(key, value);
		self
	}

	/// Adds a child (builder form).
	pub fn with_child(mut self, child: impl IntoVNode<N>) -> Self {
		self.push_child(child.into_vnode());
		self
	}

	/// Sets a property, replacing an existing value in place.
	///
	/// Children are not a scalar entry: setting `children` is ignored, use
	/// [`push_child`](Self::push_child) instead.
	pub fn set(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<PropValue<N>>) {
		let key = key.into();
		if key == keys::CHILDREN {
			tracing::warn!("ignoring scalar value for the reserved `children` key");
			return;
		}
		let value = value.into();
		match self.entries.iter_mut().find(|(k, _)| *k == key) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((key, value)),
		}
	}

	/// Removes a property and returns its value.
	pub fn remove(&mut self, key: &str) -> Option<PropValue<N>> {
		let index = self.entries.iter().position(|(k, _)| k == key)?;
		Some(self.entries.remove(index).1)
	}

	/// Returns the value of a property.
	pub fn get(&self, key: &str) -> Option<&PropValue<N>> {
		self.entries
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v)
	}

	/// Returns true if the property is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.iter().any(|(k, _)| k == key)
	}

	/// Property keys in insertion order (without `children`).
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(k, _)| k.as_ref())
	}

	/// Properties in insertion order (without `children`).
	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue<N>)> {
		self.entries.iter().map(|(k, v)| (k.as_ref(), v))
	}

	/// Number of properties (without `children`).
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if there are no properties.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The ordered child sequence.
	pub fn children(&self) -> &[VNode<N>] {
		&self.children
	}

	/// Appends a child.
	pub fn push_child(&mut self, child: VNode<N>) {
		self.children.push(child);
	}

	/// The identity key.
	pub fn key(&self) -> Option<&PropValue<N>> {
		self.get(keys::KEY)
	}

	/// The `onCreate` hook, if set to a node callback.
	pub fn on_create(&self) -> Option<&crate::callback::NodeCallback<N>> {
		self.get(keys::ON_CREATE).and_then(PropValue::as_node_callback)
	}

	/// The `onUpdate` hook, if set to a node callback.
	pub fn on_update(&self) -> Option<&crate::callback::NodeCallback<N>> {
		self.get(keys::ON_UPDATE).and_then(PropValue::as_node_callback)
	}

	/// The `onRemove` hook, if set to a node callback.
	pub fn on_remove(&self) -> Option<&crate::callback::NodeCallback<N>> {
		self.get(keys::ON_REMOVE).and_then(PropValue::as_node_callback)
	}
}

/// Returns the identity key of a structured node when it is truthy.
pub fn get_key<N>(node: &VNode<N>) -> Option<&PropValue<N>> {
	node.attributes()?.key().filter(|key| key.is_truthy())
}

/// Conversion into a [`VNode`].
pub trait IntoVNode<N> {
	/// Converts self into a virtual node.
	fn into_vnode(self) -> VNode<N>;
}

impl<N> IntoVNode<N> for VNode<N> {
	fn into_vnode(self) -> VNode<N> {
		self
	}
}

impl<N> IntoVNode<N> for VElement<N> {
	fn into_vnode(self) -> VNode<N> {
		VNode::Element(self)
	}
}

impl<N> IntoVNode<N> for &'static str {
	fn into_vnode(self) -> VNode<N> {
		VNode::Text(Cow::Borrowed(self))
	}
}

impl<N> IntoVNode<N> for String {
	fn into_vnode(self) -> VNode<N> {
		VNode::Text(Cow::Owned(self))
	}
}

impl<N> IntoVNode<N> for &String {
	fn into_vnode(self) -> VNode<N> {
		VNode::Text(Cow::Owned(self.clone()))
	}
}

impl<N> IntoVNode<N> for f64 {
	fn into_vnode(self) -> VNode<N> {
		VNode::Number(self)
	}
}

impl<N> IntoVNode<N> for i32 {
	fn into_vnode(self) -> VNode<N> {
		VNode::Number(f64::from(self))
	}
}

impl<N> IntoVNode<N> for bool {
	fn into_vnode(self) -> VNode<N> {
		VNode::Bool(self)
	}
}

impl<N> From<VElement<N>> for VNode<N> {
	fn from(element: VElement<N>) -> Self {
		VNode::Element(element)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	type Node = VNode<()>;
	type Element = VElement<()>;

	#[rstest]
	fn test_element_builder() {
		let element = Element::new("div")
			.class("container")
			.attr("id", "main")
			.child("Hello")
			.child(Element::new("span").child("World"));

		assert_eq!(element.tag_name(), Some("div"));
		assert_eq!(element.attributes().len(), 2);
		assert_eq!(element.attributes().children().len(), 2);
		assert_eq!(
			element.attributes().get("class"),
			Some(&PropValue::from("container"))
		);
	}

	#[rstest]
	fn test_element_shorthand_and_attributes_mut() {
		let mut element = Node::element("li").attr("id", "first");
		element.attributes_mut().set("id", "second");
		element.attributes_mut().set("title", "t");

		assert_eq!(element.tag_name(), Some("li"));
		assert_eq!(element.attributes().get("id"), Some(&PropValue::from("second")));
		assert_eq!(element.attributes().keys().collect::<Vec<_>>(), vec!["id", "title"]);
	}

	#[rstest]
	fn test_props_set_replaces_in_place() {
		let mut props = Props::<()>::new().with("a", 1).with("b", 2);
		props.set("a", 3);

		assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b"]);
		assert_eq!(props.get("a"), Some(&PropValue::Number(3.0)));
	}

	#[rstest]
	fn test_props_children_key_is_reserved() {
		let mut props = Props::<()>::new();
		props.set("children", "oops");

		assert!(!props.contains_key("children"));
		assert!(props.children().is_empty());
	}

	#[rstest]
	fn test_props_remove() {
		let mut props = Props::<()>::new().with("a", 1);

		assert_eq!(props.remove("a"), Some(PropValue::Number(1.0)));
		assert_eq!(props.remove("a"), None);
		assert!(props.is_empty());
	}

	#[rstest]
	#[case("click", "onClick")]
	#[case("input", "onInput")]
	#[case("", "on")]
	fn test_event_key(#[case] event: &str, #[case] expected: &str) {
		assert_eq!(event_key(event), expected);
	}

	#[rstest]
	fn test_display_primitives() {
		assert_eq!(Node::text("hi").to_string(), "hi");
		assert_eq!(Node::Number(42.0).to_string(), "42");
		assert_eq!(Node::Bool(false).to_string(), "false");
	}

	#[rstest]
	fn test_display_structured_node_is_text_content() {
		let node: Node = Element::tagless()
			.child("a")
			.child(Element::new("b").child(1))
			.child(true)
			.into();

		assert_eq!(node.to_string(), "a1true");
	}

	#[rstest]
	fn test_get_key() {
		let keyed: Node = Element::new("li").key("row-1").into();
		let unkeyed: Node = Element::new("li").into();
		let empty_key: Node = Element::new("li").key("").into();

		assert_eq!(get_key(&keyed), Some(&PropValue::from("row-1")));
		assert_eq!(get_key(&unkeyed), None);
		assert_eq!(get_key(&empty_key), None);
		assert_eq!(get_key(&Node::text("x")), None);
	}

	#[rstest]
	fn test_lifecycle_accessors_ignore_non_callbacks() {
		let props = Props::<()>::new()
			.with(keys::ON_CREATE, PropValue::node(|_| {}))
			.with(keys::ON_UPDATE, "not a function");

		assert!(props.on_create().is_some());
		assert!(props.on_update().is_none());
		assert!(props.on_remove().is_none());
	}

	#[rstest]
	fn test_maybe_child() {
		let element = Element::new("p")
			.maybe_child(Some("shown"))
			.maybe_child(None::<&'static str>);

		assert_eq!(element.attributes().children().len(), 1);
	}
}
