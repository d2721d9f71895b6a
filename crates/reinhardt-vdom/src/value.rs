//! Property values carried by virtual nodes.
//!
//! [`PropValue`] is deliberately loose: it mirrors what a host property can
//! hold (scalars, style maps, raw markup, callbacks) and follows JavaScript
//! truthiness, because the reconciler decides between "set" and "clear" based
//! on whether a value is truthy.

use std::borrow::Cow;

use crate::callback::{Callback, Event, EventHandler, NodeCallback};

/// A value assigned to a property key of a virtual node.
pub enum PropValue<N> {
	/// An explicit null.
	Null,
	/// A boolean.
	Bool(bool),
	/// A number.
	Number(f64),
	/// A string.
	Str(Cow<'static, str>),
	/// Inline style declarations.
	Style(StyleMap),
	/// Raw markup for `dangerouslySetInnerHTML`.
	Html(RawHtml),
	/// An event handler.
	Event(EventHandler<N>),
	/// A callback receiving the live node (refs, lifecycle hooks).
	Node(NodeCallback<N>),
}

impl<N> PropValue<N> {
	/// Wraps a closure as an event handler value.
	pub fn event<F>(f: F) -> Self
	where
		F: Fn(&Event<N>) + 'static,
	{
		PropValue::Event(Callback::new(f))
	}

	/// Wraps a closure as a node callback value.
	pub fn node<F>(f: F) -> Self
	where
		F: Fn(&N) + 'static,
	{
		PropValue::Node(Callback::new(f))
	}

	/// JavaScript truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
	pub fn is_truthy(&self) -> bool {
		match self {
			PropValue::Null => false,
			PropValue::Bool(b) => *b,
			PropValue::Number(n) => *n != 0.0 && !n.is_nan(),
			PropValue::Str(s) => !s.is_empty(),
			PropValue::Style(_) | PropValue::Html(_) | PropValue::Event(_) | PropValue::Node(_) => {
				true
			}
		}
	}

	/// Whether the value is a function-like value.
	pub fn is_callback(&self) -> bool {
		matches!(self, PropValue::Event(_) | PropValue::Node(_))
	}

	/// Returns the string if this is a [`PropValue::Str`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			PropValue::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the node callback if this is a [`PropValue::Node`].
	pub fn as_node_callback(&self) -> Option<&NodeCallback<N>> {
		match self {
			PropValue::Node(callback) => Some(callback),
			_ => None,
		}
	}

	/// String form used when the value is written as a host attribute.
	///
	/// Callbacks and `Null` have no attribute form.
	pub fn to_attr_string(&self) -> Option<Cow<'_, str>> {
		match self {
			PropValue::Null | PropValue::Event(_) | PropValue::Node(_) => None,
			PropValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
			PropValue::Number(n) => Some(Cow::Owned(format_number(*n))),
			PropValue::Str(s) => Some(Cow::Borrowed(s)),
			PropValue::Style(style) => Some(Cow::Owned(style.to_css_text())),
			PropValue::Html(html) => Some(Cow::Borrowed(html.html().unwrap_or(""))),
		}
	}
}

impl<N> Clone for PropValue<N> {
	fn clone(&self) -> Self {
		match self {
			PropValue::Null => PropValue::Null,
			PropValue::Bool(b) => PropValue::Bool(*b),
			PropValue::Number(n) => PropValue::Number(*n),
			PropValue::Str(s) => PropValue::Str(s.clone()),
			PropValue::Style(style) => PropValue::Style(style.clone()),
			PropValue::Html(html) => PropValue::Html(html.clone()),
			PropValue::Event(handler) => PropValue::Event(handler.clone()),
			PropValue::Node(callback) => PropValue::Node(callback.clone()),
		}
	}
}

/// Scalars and data compare by value, callbacks by identity.
impl<N> PartialEq for PropValue<N> {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(PropValue::Null, PropValue::Null) => true,
			(PropValue::Bool(a), PropValue::Bool(b)) => a == b,
			(PropValue::Number(a), PropValue::Number(b)) => a == b,
			(PropValue::Str(a), PropValue::Str(b)) => a == b,
			(PropValue::Style(a), PropValue::Style(b)) => a == b,
			(PropValue::Html(a), PropValue::Html(b)) => a == b,
			(PropValue::Event(a), PropValue::Event(b)) => a.ptr_eq(b),
			(PropValue::Node(a), PropValue::Node(b)) => a.ptr_eq(b),
			_ => false,
		}
	}
}

impl<N> std::fmt::Debug for PropValue<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PropValue::Null => f.write_str("Null"),
			PropValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			PropValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
			PropValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
			PropValue::Style(style) => f.debug_tuple("Style").field(style).finish(),
			PropValue::Html(html) => f.debug_tuple("Html").field(html).finish(),
			PropValue::Event(_) => f.write_str("Event(<function>)"),
			PropValue::Node(_) => f.write_str("Node(<function>)"),
		}
	}
}

impl<N> From<&'static str> for PropValue<N> {
	fn from(value: &'static str) -> Self {
		PropValue::Str(Cow::Borrowed(value))
	}
}

impl<N> From<String> for PropValue<N> {
	fn from(value: String) -> Self {
		PropValue::Str(Cow::Owned(value))
	}
}

impl<N> From<Cow<'static, str>> for PropValue<N> {
	fn from(value: Cow<'static, str>) -> Self {
		PropValue::Str(value)
	}
}

impl<N> From<bool> for PropValue<N> {
	fn from(value: bool) -> Self {
		PropValue::Bool(value)
	}
}

impl<N> From<f64> for PropValue<N> {
	fn from(value: f64) -> Self {
		PropValue::Number(value)
	}
}

macro_rules! impl_from_integer {
	($($ty:ty),*) => {
		$(
			impl<N> From<$ty> for PropValue<N> {
				fn from(value: $ty) -> Self {
					PropValue::Number(value as f64)
				}
			}
		)*
	};
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl<N> From<StyleMap> for PropValue<N> {
	fn from(value: StyleMap) -> Self {
		PropValue::Style(value)
	}
}

impl<N> From<RawHtml> for PropValue<N> {
	fn from(value: RawHtml) -> Self {
		PropValue::Html(value)
	}
}

impl<N, T: Into<PropValue<N>>> From<Option<T>> for PropValue<N> {
	fn from(value: Option<T>) -> Self {
		value.map_or(PropValue::Null, Into::into)
	}
}

/// Formats a number the way a JavaScript host stringifies it.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, use exponent notation
/// with an explicit sign (`1e+21`, `1.5e-7`).
pub(crate) fn format_number(n: f64) -> String {
	if n.is_nan() {
		"NaN".to_string()
	} else if n.is_infinite() {
		let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
		text.to_string()
	} else if n == 0.0 {
		"0".to_string()
	} else if n.abs() >= 1e21 || n.abs() < 1e-6 {
		let text = format!("{n:e}");
		match text.split_once('e') {
			Some((mantissa, exponent)) if !exponent.starts_with('-') => {
				format!("{mantissa}e+{exponent}")
			}
			_ => text,
		}
	} else {
		n.to_string()
	}
}

/// Ordered inline style declarations (`name -> value`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
	entries: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl StyleMap {
	/// Creates an empty style map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a declaration (builder form).
	pub fn with(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.set(name, value);
		self
	}

	/// Adds or replaces a declaration, keeping the original position.
	pub fn set(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) {
		let name = name.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(n, _)| *n == name) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((name, value)),
		}
	}

	/// Removes a declaration and returns its value.
	pub fn remove(&mut self, name: &str) -> Option<Cow<'static, str>> {
		let index = self.entries.iter().position(|(n, _)| n == name)?;
		Some(self.entries.remove(index).1)
	}

	/// Returns the value of a declaration.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_ref())
	}

	/// Declaration names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(n, _)| n.as_ref())
	}

	/// Declarations in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(n, v)| (n.as_ref(), v.as_ref()))
	}

	/// Number of declarations.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if there are no declarations.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Parses `name: value; name: value` css text.
	///
	/// Declarations without a colon or with an empty name are skipped.
	pub fn parse(css: &str) -> Self {
		let mut style = Self::new();
		for declaration in css.split(';') {
			let Some((name, value)) = declaration.split_once(':') else {
				continue;
			};
			let name = name.trim();
			if name.is_empty() {
				continue;
			}
			style.set(name.to_string(), value.trim().to_string());
		}
		style
	}

	/// Serializes non-empty declarations as css text.
	pub fn to_css_text(&self) -> String {
		self.iter()
			.filter(|(_, value)| !value.is_empty())
			.map(|(name, value)| format!("{name}: {value};"))
			.collect::<Vec<_>>()
			.join(" ")
	}
}

impl<K, V> FromIterator<(K, V)> for StyleMap
where
	K: Into<Cow<'static, str>>,
	V: Into<Cow<'static, str>>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut style = Self::new();
		for (name, value) in iter {
			style.set(name, value);
		}
		style
	}
}

/// Raw markup payload for `dangerouslySetInnerHTML` (the `__html` field).
///
/// The markup is inserted verbatim; callers are responsible for sanitizing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHtml {
	html: Option<Cow<'static, str>>,
}

impl RawHtml {
	/// Wraps trusted markup.
	pub fn new(html: impl Into<Cow<'static, str>>) -> Self {
		Self {
			html: Some(html.into()),
		}
	}

	/// A payload without an `__html` field.
	pub fn empty() -> Self {
		Self::default()
	}

	/// The `__html` payload.
	pub fn html(&self) -> Option<&str> {
		self.html.as_deref()
	}
}
