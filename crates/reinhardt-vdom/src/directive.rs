//! Directive plugin protocol.
//!
//! A directive is a named plugin bound to a property key. Its handler has one
//! mandatory hook (`oncreate`) and two optional ones (`onupdate`,
//! `onremove`); the optional hooks are plain `Option`s checked before
//! invocation, so a handler without them is a complete, valid handler.
//!
//! The reconciler only consumes the [`DirectiveLookup`] trait. This module
//! also ships [`DirectiveRegistry`], an in-memory lookup keyed by directive
//! name and recognizing keys of the form `{prefix}{name}`.
//!
//! ## Example
//!
//! ```
//! use reinhardt_vdom::directive::{DirectiveHandler, DirectiveLookup, DirectiveRegistry};
//! use reinhardt_vdom::host::HostNode;
//! use reinhardt_vdom::host::memory::MemoryNode;
//!
//! let mut registry = DirectiveRegistry::<MemoryNode>::new();
//! registry.register(
//!     "focus",
//!     DirectiveHandler::new(|node: &MemoryNode, _binding| {
//!         let _ = node.set_attribute("data-focused", "true");
//!     }),
//! );
//!
//! assert!(registry.is_directive("v-focus"));
//! assert!(!registry.is_directive("focus"));
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::VdomConfig;
use crate::value::PropValue;
use crate::vnode::Props;

/// A directive hook, invoked with the live node and the current binding.
pub type DirectiveHook<N> = Rc<dyn Fn(&N, &DirectiveBinding<N>) + 'static>;

/// Hooks implementing a directive.
pub struct DirectiveHandler<N> {
	oncreate: DirectiveHook<N>,
	onupdate: Option<DirectiveHook<N>>,
	onremove: Option<DirectiveHook<N>>,
}

impl<N> DirectiveHandler<N> {
	/// Creates a handler with its mandatory creation hook.
	pub fn new<F>(oncreate: F) -> Self
	where
		F: Fn(&N, &DirectiveBinding<N>) + 'static,
	{
		Self {
			oncreate: Rc::new(oncreate),
			onupdate: None,
			onremove: None,
		}
	}

	/// Adds the update hook.
	pub fn on_update<F>(mut self, onupdate: F) -> Self
	where
		F: Fn(&N, &DirectiveBinding<N>) + 'static,
	{
		self.onupdate = Some(Rc::new(onupdate));
		self
	}

	/// Adds the removal hook.
	pub fn on_remove<F>(mut self, onremove: F) -> Self
	where
		F: Fn(&N, &DirectiveBinding<N>) + 'static,
	{
		self.onremove = Some(Rc::new(onremove));
		self
	}

	/// The creation hook.
	pub fn oncreate(&self) -> &DirectiveHook<N> {
		&self.oncreate
	}

	/// The update hook, if any.
	pub fn onupdate(&self) -> Option<&DirectiveHook<N>> {
		self.onupdate.as_ref()
	}

	/// The removal hook, if any.
	pub fn onremove(&self) -> Option<&DirectiveHook<N>> {
		self.onremove.as_ref()
	}
}

impl<N> std::fmt::Debug for DirectiveHandler<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DirectiveHandler")
			.field("oncreate", &"<function>")
			.field("onupdate", &self.onupdate.as_ref().map(|_| "<function>"))
			.field("onremove", &self.onremove.as_ref().map(|_| "<function>"))
			.finish()
	}
}

/// A resolved directive: its name and handler.
pub struct Directive<N> {
	/// Directive name, without the key prefix.
	pub name: String,
	/// The hooks.
	pub handler: Rc<DirectiveHandler<N>>,
}

impl<N> Clone for Directive<N> {
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			handler: Rc::clone(&self.handler),
		}
	}
}

impl<N> std::fmt::Debug for Directive<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Directive")
			.field("name", &self.name)
			.field("handler", &self.handler)
			.finish()
	}
}

/// The value passed to directive hooks for one reconciliation call.
///
/// `expression` is the raw property value, identical to `value`.
pub struct DirectiveBinding<N> {
	/// Directive name.
	pub name: String,
	/// The directive's hooks.
	pub handler: Rc<DirectiveHandler<N>>,
	/// Current property value.
	pub value: PropValue<N>,
	/// Raw property value.
	pub expression: PropValue<N>,
}

impl<N> DirectiveBinding<N> {
	/// Builds the binding of `directive` for the given property value.
	pub fn new(directive: &Directive<N>, value: PropValue<N>) -> Self {
		Self {
			name: directive.name.clone(),
			handler: Rc::clone(&directive.handler),
			expression: value.clone(),
			value,
		}
	}
}

impl<N> std::fmt::Debug for DirectiveBinding<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DirectiveBinding")
			.field("name", &self.name)
			.field("value", &self.value)
			.field("expression", &self.expression)
			.finish()
	}
}

/// Resolves property keys to directives.
pub trait DirectiveLookup<N> {
	/// Whether `key` names a directive.
	fn is_directive(&self, key: &str) -> bool;

	/// Resolves `key` to its directive.
	fn get_directive(&self, key: &str) -> Option<Directive<N>>;

	/// Invokes `callback` for every directive key in `props`, in property order.
	fn scan_directive_props(&self, props: &Props<N>, callback: &mut dyn FnMut(&str, &PropValue<N>)) {
		for (key, value) in props.iter() {
			if self.is_directive(key) {
				callback(key, value);
			}
		}
	}
}

/// A lookup that recognizes no directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectives;

impl<N> DirectiveLookup<N> for NoDirectives {
	fn is_directive(&self, _key: &str) -> bool {
		false
	}

	fn get_directive(&self, _key: &str) -> Option<Directive<N>> {
		None
	}
}

/// In-memory directive registry.
///
/// A property key is a directive iff it is the configured prefix followed by
/// a registered name (`v-focus` for the `focus` directive by default).
pub struct DirectiveRegistry<N> {
	prefix: String,
	directives: HashMap<String, Rc<DirectiveHandler<N>>>,
}

impl<N> DirectiveRegistry<N> {
	/// Creates an empty registry with the default `v-` prefix.
	pub fn new() -> Self {
		Self::with_prefix(VdomConfig::default().directive_prefix)
	}

	/// Creates an empty registry with a custom key prefix.
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			directives: HashMap::new(),
		}
	}

	/// Creates an empty registry using the configured prefix.
	pub fn from_config(config: &VdomConfig) -> Self {
		Self::with_prefix(config.directive_prefix.clone())
	}

	/// Registers a directive, replacing any directive with the same name.
	pub fn register(&mut self, name: impl Into<String>, handler: DirectiveHandler<N>) {
		let name = name.into();
		if self
			.directives
			.insert(name.clone(), Rc::new(handler))
			.is_some()
		{
			tracing::debug!(directive = %name, "replaced registered directive");
		}
	}

	/// Removes a directive. Returns true if it was registered.
	pub fn unregister(&mut self, name: &str) -> bool {
		self.directives.remove(name).is_some()
	}

	/// The key prefix.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Whether a directive with this name is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.directives.contains_key(name)
	}

	/// Number of registered directives.
	pub fn len(&self) -> usize {
		self.directives.len()
	}

	/// Returns true if no directive is registered.
	pub fn is_empty(&self) -> bool {
		self.directives.is_empty()
	}

	fn name_of<'k>(&self, key: &'k str) -> Option<&'k str> {
		key.strip_prefix(self.prefix.as_str())
			.filter(|name| self.directives.contains_key(*name))
	}
}

impl<N> Default for DirectiveRegistry<N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<N> std::fmt::Debug for DirectiveRegistry<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut names: Vec<_> = self.directives.keys().collect();
		names.sort();
		f.debug_struct("DirectiveRegistry")
			.field("prefix", &self.prefix)
			.field("directives", &names)
			.finish()
	}
}

impl<N> DirectiveLookup<N> for DirectiveRegistry<N> {
	fn is_directive(&self, key: &str) -> bool {
		self.name_of(key).is_some()
	}

	fn get_directive(&self, key: &str) -> Option<Directive<N>> {
		let name = self.name_of(key)?;
		let handler = self.directives.get(name)?;
		Some(Directive {
			name: name.to_string(),
			handler: Rc::clone(handler),
		})
	}
}
