//! Single-property application.

use std::borrow::Cow;

use crate::callback::{Event, EventHandler};
use crate::directive::{DirectiveBinding, DirectiveLookup};
use crate::host::{Document, HostNode};
use crate::value::{PropValue, StyleMap};
use crate::vnode::keys;

use super::Reconciler;

/// How a property key is applied to a live node.
///
/// Keys are classified top to bottom and the first matching category wins,
/// so `onCreate` is a lifecycle key even though it has the shape of an event
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
	/// `key` and `children`: never applied.
	Structural,
	/// `onCreate`, `onUpdate`, `onRemove`: fired by the reconciler, never
	/// installed as listeners.
	Lifecycle,
	/// `ref`: callback receiving the live node once.
	Ref,
	/// `class` / `className`.
	Class,
	/// `style`.
	Style,
	/// `dangerouslySetInnerHTML`.
	InnerHtml,
	/// `on` followed by an uppercase letter.
	Event,
	/// A key the directive lookup recognizes.
	Directive,
	/// Everything else: property assignment plus attribute.
	Generic,
}

impl PropKind {
	/// Classifies `key`, consulting `directives` for directive keys.
	pub fn classify<N, R>(key: &str, directives: &R) -> Self
	where
		R: DirectiveLookup<N> + ?Sized,
	{
		match key {
			keys::KEY | keys::CHILDREN => PropKind::Structural,
			k if keys::LIFECYCLE.contains(&k) => PropKind::Lifecycle,
			keys::REF => PropKind::Ref,
			keys::CLASS | keys::CLASS_NAME => PropKind::Class,
			keys::STYLE => PropKind::Style,
			keys::INNER_HTML => PropKind::InnerHtml,
			k if is_event_key(k) => PropKind::Event,
			k if directives.is_directive(k) => PropKind::Directive,
			_ => PropKind::Generic,
		}
	}
}

/// `on` followed by an uppercase character.
pub(crate) fn is_event_key(key: &str) -> bool {
	key.strip_prefix("on")
		.and_then(|rest| rest.chars().next())
		.is_some_and(char::is_uppercase)
}

impl<D, R> Reconciler<'_, D, R>
where
	D: Document,
	R: DirectiveLookup<D::Node> + ?Sized,
{
	/// Applies one property to a live node.
	///
	/// `value` is the new value (`None` when the key was removed) and `old`
	/// the previous one. `is_svg` selects attribute semantics for the class
	/// list; `updating` selects the directive hook (`onupdate` instead of
	/// `oncreate`). Host refusals are logged, never returned.
	pub fn set_prop(
		&self,
		node: &D::Node,
		key: &str,
		value: Option<&PropValue<D::Node>>,
		old: Option<&PropValue<D::Node>>,
		is_svg: bool,
		updating: bool,
	) {
		let kind = PropKind::classify(key, self.directives);
		tracing::trace!(key, ?kind, updating, "applying property");

		match kind {
			PropKind::Structural | PropKind::Lifecycle => {}
			PropKind::Ref => apply_ref(node, value),
			PropKind::Class => apply_class(node, value, is_svg),
			PropKind::Style => apply_style(node, value, old),
			PropKind::InnerHtml => apply_inner_html(node, value),
			PropKind::Event => apply_listener(node, key, value),
			PropKind::Directive => self.apply_directive(node, key, value, updating),
			PropKind::Generic => apply_generic(node, key, value),
		}
	}

	fn apply_directive(
		&self,
		node: &D::Node,
		key: &str,
		value: Option<&PropValue<D::Node>>,
		updating: bool,
	) {
		let Some(directive) = self.directives.get_directive(key) else {
			tracing::warn!(key, "no handler registered for directive key");
			return;
		};
		let binding = DirectiveBinding::new(&directive, value.cloned().unwrap_or(PropValue::Null));

		if !updating {
			(directive.handler.oncreate())(node, &binding);
		} else if let Some(onupdate) = directive.handler.onupdate() {
			onupdate(node, &binding);
		} else {
			tracing::debug!(directive = %directive.name, "directive has no update hook");
		}
	}
}

fn apply_ref<N: HostNode>(node: &N, value: Option<&PropValue<N>>) {
	match value {
		Some(PropValue::Node(callback)) => {
			if !node.has_node_ref() {
				node.attach_node_ref(callback.clone());
				callback.call(node);
			}
		}
		Some(other) if other.is_truthy() => {
			tracing::warn!(value = ?other, "ignoring ref that is not a node callback");
		}
		_ => {}
	}
}

fn apply_class<N: HostNode>(node: &N, value: Option<&PropValue<N>>, is_svg: bool) {
	let class = value
		.filter(|v| v.is_truthy())
		.and_then(PropValue::to_attr_string)
		.unwrap_or_default();

	if is_svg {
		if let Err(error) = node.set_attribute("class", &class) {
			tracing::warn!(%error, "failed to set class attribute");
		}
	} else {
		node.set_class_name(&class);
	}
}

/// Style declarations of a value. Css text is parsed.
fn style_of<N>(value: Option<&PropValue<N>>) -> Option<Cow<'_, StyleMap>> {
	match value? {
		PropValue::Style(style) => Some(Cow::Borrowed(style)),
		PropValue::Str(css) => Some(Cow::Owned(StyleMap::parse(css))),
		other if other.is_truthy() => {
			tracing::warn!(value = ?other, "ignoring unsupported style value");
			None
		}
		_ => None,
	}
}

fn apply_style<N: HostNode>(node: &N, value: Option<&PropValue<N>>, old: Option<&PropValue<N>>) {
	let next = style_of(value).unwrap_or_default();
	let previous = style_of(old).unwrap_or_default();

	for name in previous.names() {
		if next.get(name).is_none() {
			node.set_style_property(name, "");
		}
	}
	for (name, declaration) in next.iter() {
		node.set_style_property(name, declaration);
	}
}

fn apply_inner_html<N: HostNode>(node: &N, value: Option<&PropValue<N>>) {
	match value {
		Some(PropValue::Html(raw)) => node.set_inner_html(raw.html().unwrap_or("")),
		Some(other) if other.is_truthy() => node.set_inner_html(""),
		_ => {}
	}
}

fn apply_listener<N: HostNode>(node: &N, key: &str, value: Option<&PropValue<N>>) {
	let event = key[2..].to_lowercase();
	let handler = match value {
		Some(PropValue::Event(handler)) => Some(handler.clone()),
		Some(PropValue::Node(callback)) => {
			let callback = callback.clone();
			Some(EventHandler::new(move |event: &Event<N>| {
				callback.call(event.target())
			}))
		}
		Some(other) if other.is_truthy() => Some(EventHandler::noop()),
		_ => None,
	};
	node.set_event_listener(&event, handler);
}

fn apply_generic<N: HostNode>(node: &N, key: &str, value: Option<&PropValue<N>>) {
	let value = value.cloned().unwrap_or(PropValue::Null);

	if let Err(error) = node.set_property(key, &value) {
		tracing::debug!(key, %error, "property assignment refused, falling back to attribute");
	}

	if value.is_callback() {
		return;
	}
	match value.to_attr_string() {
		Some(text) if value.is_truthy() => {
			if let Err(error) = node.set_attribute(key, &text) {
				tracing::warn!(key, %error, "failed to set attribute");
			}
		}
		_ => node.remove_attribute(key),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::callback::NodeCallback;
	use crate::directive::{DirectiveHandler, DirectiveRegistry, NoDirectives};
	use crate::host::memory::{MemoryDocument, MemoryNode};
	use crate::value::RawHtml;
	use rstest::{fixture, rstest};
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	type Value = PropValue<MemoryNode>;

	#[fixture]
	fn document() -> MemoryDocument {
		MemoryDocument::new()
	}

	#[fixture]
	fn div(document: MemoryDocument) -> MemoryNode {
		document.create_element("div").unwrap()
	}

	fn reconciler(document: &MemoryDocument) -> Reconciler<'_, MemoryDocument, NoDirectives> {
		Reconciler::new(document, &NoDirectives)
	}

	#[rstest]
	#[case("key", PropKind::Structural)]
	#[case("children", PropKind::Structural)]
	#[case("onCreate", PropKind::Lifecycle)]
	#[case("onUpdate", PropKind::Lifecycle)]
	#[case("onRemove", PropKind::Lifecycle)]
	#[case("ref", PropKind::Ref)]
	#[case("class", PropKind::Class)]
	#[case("className", PropKind::Class)]
	#[case("style", PropKind::Style)]
	#[case("dangerouslySetInnerHTML", PropKind::InnerHtml)]
	#[case("onClick", PropKind::Event)]
	#[case("onDblClick", PropKind::Event)]
	#[case("online", PropKind::Generic)]
	#[case("on", PropKind::Generic)]
	#[case("v-focus", PropKind::Directive)]
	#[case("v-unknown", PropKind::Generic)]
	#[case("id", PropKind::Generic)]
	fn test_classify(#[case] key: &str, #[case] expected: PropKind) {
		let mut registry = DirectiveRegistry::<()>::new();
		registry.register("focus", DirectiveHandler::new(|_, _| {}));

		assert_eq!(PropKind::classify(key, &registry), expected);
	}

	#[rstest]
	#[case(Value::from("x"), Some("x"))]
	#[case(Value::Number(5.0), Some("5"))]
	#[case(Value::Bool(true), Some("true"))]
	#[case(Value::Bool(false), None)]
	#[case(Value::from(""), None)]
	#[case(Value::Null, None)]
	fn test_generic_attribute(
		document: MemoryDocument,
		div: MemoryNode,
		#[case] value: Value,
		#[case] expected: Option<&str>,
	) {
		let reconciler = reconciler(&document);
		div.set_attribute("title", "previous").unwrap();

		reconciler.set_prop(&div, "title", Some(&value), None, false, false);

		assert_eq!(div.attribute("title").as_deref(), expected);
	}

	#[rstest]
	fn test_generic_absent_value_removes_attribute(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);
		reconciler.set_prop(&div, "title", Some(&Value::from("a")), None, false, false);

		reconciler.set_prop(&div, "title", None, Some(&Value::from("a")), false, true);

		assert_eq!(div.attribute("title"), None);
		assert_eq!(div.property("title"), Some(Value::Null));
	}

	#[rstest]
	fn test_generic_read_only_property_still_sets_attribute(
		document: MemoryDocument,
		div: MemoryNode,
	) {
		let reconciler = reconciler(&document);

		reconciler.set_prop(&div, "nodeName", Some(&Value::from("x")), None, false, false);

		assert_eq!(div.attribute("nodeName").as_deref(), Some("x"));
		assert_eq!(div.property("nodeName"), Some(Value::from("DIV")));
	}

	#[rstest]
	fn test_generic_callback_is_property_only(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);
		let callback = Value::node(|_| {});

		reconciler.set_prop(&div, "formatter", Some(&callback), None, false, false);

		assert_eq!(div.property("formatter"), Some(callback));
		assert_eq!(div.attribute("formatter"), None);
	}

	#[rstest]
	#[case(Some(Value::from("a b")), "a b")]
	#[case(Some(Value::Null), "")]
	#[case(Some(Value::Bool(false)), "")]
	#[case(None, "")]
	fn test_class(
		document: MemoryDocument,
		div: MemoryNode,
		#[case] value: Option<Value>,
		#[case] expected: &str,
	) {
		let reconciler = reconciler(&document);

		reconciler.set_prop(&div, "className", value.as_ref(), None, false, false);

		assert_eq!(div.class_name(), expected);
	}

	#[rstest]
	fn test_style_union(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);
		let old = Value::from(StyleMap::new().with("color", "red").with("margin", "1px"));
		let new = Value::from(StyleMap::new().with("color", "blue"));
		reconciler.set_prop(&div, "style", Some(&old), None, false, false);

		reconciler.set_prop(&div, "style", Some(&new), Some(&old), false, true);

		assert_eq!(div.style_property("color").as_deref(), Some("blue"));
		assert_eq!(div.style_property("margin"), None);
	}

	#[rstest]
	fn test_style_css_text(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);

		reconciler.set_prop(&div, "style", Some(&Value::from("color: red; top: 0")), None, false, false);
		reconciler.set_prop(&div, "style", None, Some(&Value::from("color: red; top: 0")), false, true);

		assert_eq!(div.style_property("color"), None);
		assert_eq!(div.style_property("top"), None);
	}

	#[rstest]
	#[case(Some(Value::from(RawHtml::new("<em>x</em>"))), Some("<em>x</em>"))]
	#[case(Some(Value::from(RawHtml::empty())), Some(""))]
	#[case(Some(Value::from("not a payload")), Some(""))]
	#[case(Some(Value::Null), None)]
	#[case(None, None)]
	fn test_inner_html(
		document: MemoryDocument,
		div: MemoryNode,
		#[case] value: Option<Value>,
		#[case] expected: Option<&str>,
	) {
		let reconciler = reconciler(&document);

		reconciler.set_prop(&div, "dangerouslySetInnerHTML", value.as_ref(), None, false, false);

		assert_eq!(div.inner_html().as_deref(), expected);
	}

	#[rstest]
	fn test_event_install_and_clear(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);
		let clicks = Rc::new(Cell::new(0));
		let handler = Value::event({
			let clicks = Rc::clone(&clicks);
			move |_| clicks.set(clicks.get() + 1)
		});

		reconciler.set_prop(&div, "onClick", Some(&handler), None, false, false);
		div.dispatch("click");
		assert_eq!(clicks.get(), 1);

		reconciler.set_prop(&div, "onClick", Some(&Value::Null), Some(&handler), false, true);
		assert!(!div.has_listener("click"));
		assert!(div.dispatch("click").is_none());
		assert_eq!(div.attribute("onClick"), None);
	}

	#[rstest]
	fn test_event_reinstall_overwrites(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);
		let log = Rc::new(RefCell::new(Vec::new()));
		let first = Value::event({
			let log = Rc::clone(&log);
			move |_| log.borrow_mut().push("first")
		});
		let second = Value::event({
			let log = Rc::clone(&log);
			move |_| log.borrow_mut().push("second")
		});

		reconciler.set_prop(&div, "onInput", Some(&first), None, false, false);
		reconciler.set_prop(&div, "onInput", Some(&second), Some(&first), false, true);
		div.dispatch("input");

		assert_eq!(*log.borrow(), vec!["second"]);
	}

	#[rstest]
	fn test_event_truthy_non_callback_installs_noop(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);

		reconciler.set_prop(&div, "onClick", Some(&Value::Bool(true)), None, false, false);

		assert!(div.has_listener("click"));
		assert!(div.dispatch("click").is_some());
	}

	#[rstest]
	fn test_event_node_callback_receives_target(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);
		let seen = Rc::new(RefCell::new(None));
		let callback = Value::node({
			let seen = Rc::clone(&seen);
			move |node: &MemoryNode| *seen.borrow_mut() = Some(node.clone())
		});

		reconciler.set_prop(&div, "onFocus", Some(&callback), None, false, false);
		div.dispatch("focus");

		assert_eq!(seen.borrow().as_ref(), Some(&div));
	}

	#[rstest]
	fn test_ref_fires_once(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);
		let calls = Rc::new(Cell::new(0));
		let callback = Value::node({
			let calls = Rc::clone(&calls);
			move |_| calls.set(calls.get() + 1)
		});

		reconciler.set_prop(&div, "ref", Some(&callback), None, false, false);
		reconciler.set_prop(&div, "ref", Some(&callback), None, false, true);

		assert_eq!(calls.get(), 1);
		assert!(div.has_node_ref());
	}

	#[rstest]
	fn test_ref_skipped_when_marker_present(document: MemoryDocument, div: MemoryNode) {
		let reconciler = reconciler(&document);
		let calls = Rc::new(Cell::new(0));
		div.attach_node_ref(NodeCallback::noop());

		reconciler.set_prop(
			&div,
			"ref",
			Some(&Value::node({
				let calls = Rc::clone(&calls);
				move |_| calls.set(calls.get() + 1)
			})),
			None,
			false,
			false,
		);

		assert_eq!(calls.get(), 0);
	}

	#[rstest]
	#[case("onCreate")]
	#[case("key")]
	fn test_exempt_keys_are_not_applied(
		document: MemoryDocument,
		div: MemoryNode,
		#[case] key: &str,
	) {
		let reconciler = reconciler(&document);

		reconciler.set_prop(&div, key, Some(&Value::node(|_| {})), None, false, false);
		reconciler.set_prop(&div, key, Some(&Value::from("x")), None, false, false);

		assert!(div.attributes().is_empty());
		assert!(!div.has_listener("create"));
		assert_eq!(div.property(key), None);
	}

	#[rstest]
	fn test_directive_hooks(document: MemoryDocument, div: MemoryNode) {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut registry = DirectiveRegistry::new();
		registry.register(
			"tooltip",
			DirectiveHandler::new({
				let log = Rc::clone(&log);
				move |_: &MemoryNode, binding| {
					log.borrow_mut().push(format!("create {:?}", binding.value))
				}
			})
			.on_update({
				let log = Rc::clone(&log);
				move |_: &MemoryNode, binding| {
					log.borrow_mut().push(format!("update {:?}", binding.expression))
				}
			}),
		);
		registry.register("focus", DirectiveHandler::new(|_, _| {}));
		let reconciler = Reconciler::new(&document, &registry);

		reconciler.set_prop(&div, "v-tooltip", Some(&Value::from("a")), None, false, false);
		reconciler.set_prop(&div, "v-tooltip", Some(&Value::from("b")), None, false, true);
		// No update hook: skipped.
		reconciler.set_prop(&div, "v-focus", Some(&Value::Bool(true)), None, false, true);

		assert_eq!(
			*log.borrow(),
			vec![
				"create Str(\"a\")".to_string(),
				"update Str(\"b\")".to_string()
			]
		);
		assert!(div.attributes().is_empty());
	}

	#[rstest]
	fn test_directive_without_handler_is_ignored(document: MemoryDocument, div: MemoryNode) {
		struct Broken;

		impl DirectiveLookup<MemoryNode> for Broken {
			fn is_directive(&self, key: &str) -> bool {
				key.starts_with("x-")
			}

			fn get_directive(&self, _key: &str) -> Option<crate::directive::Directive<MemoryNode>> {
				None
			}
		}

		let reconciler = Reconciler::new(&document, &Broken);
		reconciler.set_prop(&div, "x-show", Some(&Value::Bool(true)), None, false, false);

		assert!(div.attributes().is_empty());
	}

	#[rstest]
	fn test_svg_class_is_attribute(document: MemoryDocument) {
		let reconciler = reconciler(&document);
		let svg = document
			.create_element_ns(crate::config::SVG_NAMESPACE, "svg")
			.unwrap();

		reconciler.set_prop(&svg, "class", Some(&Value::from("icon")), None, true, false);

		assert_eq!(svg.attribute("class").as_deref(), Some("icon"));
	}
}
