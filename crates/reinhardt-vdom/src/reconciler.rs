//! Element materialization, update and removal.
//!
//! [`Reconciler`] owns every mutation the engine performs on the host tree.
//! It exposes the leaf-level primitives a tree differ needs:
//!
//! - [`materialize`](Reconciler::materialize): virtual node to live node,
//!   recursively, firing `onCreate` once the subtree is complete.
//! - [`update`](Reconciler::update): apply the properties that changed
//!   between two property sets, firing `onUpdate` if anything changed.
//! - [`remove`](Reconciler::remove): run directive `onremove` hooks, the
//!   user `onRemove` hook, then detach.
//! - [`set_prop`](Reconciler::set_prop): apply a single property.
//!
//! Deciding which children to create, move or delete is the differ's job.
//!
//! ## Example
//!
//! ```
//! use reinhardt_vdom::directive::NoDirectives;
//! use reinhardt_vdom::host::memory::{MemoryDocument, MemoryNode};
//! use reinhardt_vdom::host::{Document, HostNode};
//! use reinhardt_vdom::reconciler::Reconciler;
//! use reinhardt_vdom::vnode::{Props, VElement, VNode};
//!
//! let document = MemoryDocument::new();
//! let reconciler = Reconciler::new(&document, &NoDirectives);
//! let root = document.create_element("body").unwrap();
//!
//! let view: VNode<MemoryNode> = VElement::new("p").attr("id", "greeting").child("Hello").into();
//! let p = reconciler.materialize(&view, false);
//! root.append_child(&p);
//! assert_eq!(root.to_html(), r#"<body><p id="greeting">Hello</p></body>"#);
//!
//! let old = view.attributes().unwrap();
//! let new = Props::new().with("id", "farewell").with_child("Hello");
//! assert!(reconciler.update(&p, old, &new));
//! assert_eq!(p.attribute("id").as_deref(), Some("farewell"));
//! ```

use crate::config::VdomConfig;
use crate::directive::{DirectiveBinding, DirectiveLookup};
use crate::host::{Document, HostNode};
use crate::vnode::{Props, VNode};

mod props;

pub use props::PropKind;

/// Applies virtual nodes to a host tree.
pub struct Reconciler<'a, D, R>
where
	D: Document,
	R: DirectiveLookup<D::Node> + ?Sized,
{
	document: &'a D,
	directives: &'a R,
	config: VdomConfig,
}

impl<'a, D, R> Reconciler<'a, D, R>
where
	D: Document,
	R: DirectiveLookup<D::Node> + ?Sized,
{
	/// Creates a reconciler with the default configuration.
	pub fn new(document: &'a D, directives: &'a R) -> Self {
		Self::with_config(document, directives, VdomConfig::default())
	}

	/// Creates a reconciler with a custom configuration.
	pub fn with_config(document: &'a D, directives: &'a R, config: VdomConfig) -> Self {
		Self {
			document,
			directives,
			config,
		}
	}

	/// The active configuration.
	pub fn config(&self) -> &VdomConfig {
		&self.config
	}

	/// Turns a virtual node into a live node.
	///
	/// Primitives and tagless nodes become text nodes of their string form.
	/// Elements get every property applied in insertion order, then their
	/// children materialized and appended in order, then `onCreate` fired
	/// with the finished node. The SVG namespace is entered at the SVG root
	/// tag (or when `is_svg` is set) and inherited by all descendants.
	pub fn materialize(&self, vnode: &VNode<D::Node>, is_svg: bool) -> D::Node {
		let VNode::Element(element) = vnode else {
			return self.document.create_text_node(&vnode.to_string());
		};
		let Some(tag) = element.tag_name() else {
			return self.document.create_text_node(&vnode.to_string());
		};

		let is_svg = is_svg || tag == self.config.svg_root_tag;
		let created = if is_svg {
			self.document
				.create_element_ns(&self.config.svg_namespace, tag)
		} else {
			self.document.create_element(tag)
		};
		let node = match created {
			Ok(node) => node,
			Err(error) => {
				tracing::warn!(tag, %error, "element creation failed, materializing as text");
				return self.document.create_text_node(&vnode.to_string());
			}
		};
		tracing::trace!(tag, svg = is_svg, "materializing element");

		let props = element.attributes();
		for (key, value) in props.iter() {
			self.set_prop(&node, key, Some(value), None, is_svg, false);
		}
		for child in props.children() {
			let child = self.materialize(child, is_svg);
			node.append_child(&child);
		}
		if let Some(hook) = props.on_create() {
			hook.call(&node);
		}
		node
	}

	/// Applies the difference between `old` and `new` to a live element.
	///
	/// Keys are visited in the order of `old`, then keys only present in
	/// `new`. Controlled keys (`value` and `checked` by default) are compared
	/// against the live property rather than the old virtual value, so an
	/// edit made directly on the host is corrected. A change in the number of
	/// children counts as a change but children themselves are left to the
	/// differ.
	///
	/// Returns whether anything changed; `onUpdate` fires exactly once in
	/// that case.
	pub fn update(&self, node: &D::Node, old: &Props<D::Node>, new: &Props<D::Node>) -> bool {
		let is_svg = node
			.namespace_uri()
			.is_some_and(|namespace| namespace == self.config.svg_namespace);
		let mut changed = false;

		for key in union_keys(old, new) {
			let next = new.get(key);
			let previous = if self.config.is_controlled(key) {
				node.property(key)
			} else {
				old.get(key).cloned()
			};
			if next != previous.as_ref() {
				self.set_prop(node, key, next, previous.as_ref(), is_svg, true);
				changed = true;
			}
		}

		if old.children().len() != new.children().len() {
			tracing::trace!(
				before = old.children().len(),
				after = new.children().len(),
				"child count changed"
			);
			changed = true;
		}

		if changed {
			if let Some(hook) = new.on_update().or_else(|| old.on_update()) {
				hook.call(node);
			}
		}
		changed
	}

	/// Removes a live element from `parent`.
	///
	/// Directive `onremove` hooks run first in property order, then the
	/// user `onRemove` hook while the node is still attached, then the node
	/// is detached. Detaching a node that is not a child of `parent` is
	/// logged and ignored.
	pub fn remove(&self, parent: &D::Node, node: &D::Node, props: &Props<D::Node>) {
		self.directives
			.scan_directive_props(props, &mut |key, value| {
				let Some(directive) = self.directives.get_directive(key) else {
					tracing::warn!(key, "no handler registered for directive key");
					return;
				};
				if let Some(onremove) = directive.handler.onremove() {
					let binding = DirectiveBinding::new(&directive, value.clone());
					onremove(node, &binding);
				}
			});

		if let Some(hook) = props.on_remove() {
			hook.call(node);
		}

		if let Err(error) = parent.remove_child(node) {
			tracing::warn!(%error, "failed to detach removed element");
		}
	}
}

/// Keys of `old` in order, followed by keys only present in `new`.
fn union_keys<'p, N>(old: &'p Props<N>, new: &'p Props<N>) -> Vec<&'p str> {
	let mut keys: Vec<&str> = old.keys().collect();
	keys.extend(new.keys().filter(|key| !old.contains_key(key)));
	keys
}
