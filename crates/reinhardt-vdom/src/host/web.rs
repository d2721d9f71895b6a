//! Browser DOM host (`wasm32` only).
//!
//! Properties, listener properties (`onclick`, ...) and the ref marker are
//! written with `Reflect` so that arbitrary keys reach the underlying
//! JavaScript object, the same way a plain `element[key] = value` would.

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::callback::{Event, EventHandler, NodeCallback};
use crate::error::{HostError, HostResult};
use crate::host::{Document, HostNode};
use crate::value::PropValue;

/// Property holding the ref marker on a live node.
const REF_MARKER: &str = "__reinhardtVdomRef";

/// Node factory backed by a `web_sys::Document`.
#[derive(Debug, Clone)]
pub struct WebDocument {
	document: web_sys::Document,
}

impl WebDocument {
	/// Wraps an existing document.
	pub fn new(document: web_sys::Document) -> Self {
		Self { document }
	}

	/// Uses the current window's document.
	pub fn from_window() -> HostResult<Self> {
		let window = web_sys::window().ok_or(HostError::NoWindow)?;
		let document = window.document().ok_or(HostError::NoDocument)?;
		Ok(Self::new(document))
	}
}

impl Document for WebDocument {
	type Node = WebNode;

	fn create_element(&self, tag: &str) -> HostResult<WebNode> {
		self.document
			.create_element(tag)
			.map(|element| WebNode(element.into()))
			.map_err(|_| HostError::InvalidName(tag.to_string()))
	}

	fn create_element_ns(&self, namespace: &str, tag: &str) -> HostResult<WebNode> {
		self.document
			.create_element_ns(Some(namespace), tag)
			.map(|element| WebNode(element.into()))
			.map_err(|_| HostError::InvalidName(tag.to_string()))
	}

	fn create_text_node(&self, text: &str) -> WebNode {
		WebNode(self.document.create_text_node(text).into())
	}
}

/// A handle to a browser DOM node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebNode(web_sys::Node);

impl WebNode {
	/// The underlying DOM node.
	pub fn as_node(&self) -> &web_sys::Node {
		&self.0
	}

	fn element(&self) -> Option<&web_sys::Element> {
		self.0.dyn_ref::<web_sys::Element>()
	}

	fn style(&self) -> Option<JsValue> {
		self.element()?;
		Reflect::get(&self.0, &JsValue::from_str("style"))
			.ok()
			.filter(JsValue::is_object)
	}
}

impl From<web_sys::Node> for WebNode {
	fn from(node: web_sys::Node) -> Self {
		Self(node)
	}
}

impl HostNode for WebNode {
	fn append_child(&self, child: &Self) {
		if let Err(error) = self.0.append_child(&child.0) {
			tracing::warn!(error = ?error, "failed to append child");
		}
	}

	fn remove_child(&self, child: &Self) -> HostResult<()> {
		self.0
			.remove_child(&child.0)
			.map(|_| ())
			.map_err(|_| HostError::NotAChild)
	}

	fn parent_node(&self) -> Option<Self> {
		self.0.parent_node().map(WebNode)
	}

	fn namespace_uri(&self) -> Option<String> {
		self.element()?.namespace_uri()
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.element()?.get_attribute(name)
	}

	fn set_attribute(&self, name: &str, value: &str) -> HostResult<()> {
		self.element()
			.ok_or(HostError::NotAnElement)?
			.set_attribute(name, value)
			.map_err(|_| HostError::InvalidName(name.to_string()))
	}

	fn remove_attribute(&self, name: &str) {
		if let Some(element) = self.element() {
			let _ = element.remove_attribute(name);
		}
	}

	fn property(&self, name: &str) -> Option<PropValue<Self>> {
		let value = Reflect::get(&self.0, &JsValue::from_str(name)).ok()?;
		if value.is_undefined() {
			None
		} else if value.is_null() {
			Some(PropValue::Null)
		} else if let Some(b) = value.as_bool() {
			Some(PropValue::Bool(b))
		} else if let Some(n) = value.as_f64() {
			Some(PropValue::Number(n))
		} else {
			value.as_string().map(PropValue::from)
		}
	}

	fn set_property(&self, name: &str, value: &PropValue<Self>) -> HostResult<()> {
		reflect_set(&self.0, name, &to_js(value))
	}

	fn set_class_name(&self, class_name: &str) {
		if let Some(element) = self.element() {
			element.set_class_name(class_name);
		}
	}

	fn style_property(&self, name: &str) -> Option<String> {
		let style = self.style()?;
		Reflect::get(&style, &JsValue::from_str(name))
			.ok()?
			.as_string()
			.filter(|value| !value.is_empty())
	}

	fn set_style_property(&self, name: &str, value: &str) {
		let Some(style) = self.style() else {
			return;
		};
		if let Err(error) = reflect_set(&style, name, &JsValue::from_str(value)) {
			tracing::debug!(name, %error, "style declaration refused");
		}
	}

	fn set_inner_html(&self, html: &str) {
		if let Some(element) = self.element() {
			element.set_inner_html(html);
		}
	}

	fn set_event_listener(&self, event: &str, handler: Option<EventHandler<Self>>) {
		let listener = handler.map_or(JsValue::NULL, listener);
		if let Err(error) = reflect_set(&self.0, &format!("on{event}"), &listener) {
			tracing::warn!(event, %error, "failed to install listener");
		}
	}

	fn has_node_ref(&self) -> bool {
		Reflect::has(&self.0, &JsValue::from_str(REF_MARKER)).unwrap_or(false)
	}

	fn attach_node_ref(&self, callback: NodeCallback<Self>) {
		let marker = Closure::wrap(Box::new(move |node: web_sys::Node| {
			callback.call(&WebNode(node));
		}) as Box<dyn FnMut(_)>)
		.into_js_value();
		if let Err(error) = reflect_set(&self.0, REF_MARKER, &marker) {
			tracing::warn!(%error, "failed to attach ref marker");
		}
	}
}

/// Wraps a handler as a JavaScript listener. The event target passed to the
/// handler is the node the listener is installed on.
fn listener(handler: EventHandler<WebNode>) -> JsValue {
	Closure::wrap(Box::new(move |event: web_sys::Event| {
		let Some(target) = event
			.current_target()
			.and_then(|target| target.dyn_into::<web_sys::Node>().ok())
		else {
			return;
		};
		let dispatched = Event::new(event.type_(), WebNode(target));
		handler.call(&dispatched);
		if dispatched.is_default_prevented() {
			event.prevent_default();
		}
	}) as Box<dyn FnMut(_)>)
	.into_js_value()
}

fn to_js(value: &PropValue<WebNode>) -> JsValue {
	match value {
		PropValue::Null => JsValue::NULL,
		PropValue::Bool(b) => JsValue::from_bool(*b),
		PropValue::Number(n) => JsValue::from_f64(*n),
		PropValue::Str(s) => JsValue::from_str(s),
		PropValue::Style(style) => JsValue::from_str(&style.to_css_text()),
		PropValue::Html(html) => html.html().map_or(JsValue::UNDEFINED, JsValue::from_str),
		PropValue::Event(handler) => listener(handler.clone()),
		PropValue::Node(callback) => {
			let callback = callback.clone();
			Closure::wrap(Box::new(move |node: web_sys::Node| {
				callback.call(&WebNode(node));
			}) as Box<dyn FnMut(_)>)
			.into_js_value()
		}
	}
}

/// `target[name] = value`, failing when the host refuses the write.
fn reflect_set(target: &JsValue, name: &str, value: &JsValue) -> HostResult<()> {
	match Reflect::set(target, &JsValue::from_str(name), value) {
		Ok(true) => Ok(()),
		Ok(false) => Err(HostError::ReadOnlyProperty(name.to_string())),
		Err(error) => Err(js_error(error)),
	}
}

fn js_error(error: JsValue) -> HostError {
	HostError::Js(
		error
			.as_string()
			.unwrap_or_else(|| format!("{error:?}")),
	)
}
