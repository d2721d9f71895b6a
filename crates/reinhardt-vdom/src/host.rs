//! Host rendering environment abstraction.
//!
//! The reconciler never touches a concrete tree. It goes through two traits:
//!
//! - [`Document`]: creates element and text nodes.
//! - [`HostNode`]: a cheap, cloneable handle to a live node, mutated in place
//!   (the same model as a browser DOM node).
//!
//! Two hosts are provided:
//!
//! - [`memory`]: a headless tree for tests and tooling.
//! - `web` (`wasm32` only): the browser DOM through `web-sys`.

use crate::callback::{EventHandler, NodeCallback};
use crate::error::HostResult;
use crate::value::PropValue;

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Factory for live nodes.
pub trait Document {
	/// The live node handle type.
	type Node: HostNode;

	/// Creates an element in the default (HTML) namespace.
	fn create_element(&self, tag: &str) -> HostResult<Self::Node>;

	/// Creates an element in the given namespace.
	fn create_element_ns(&self, namespace: &str, tag: &str) -> HostResult<Self::Node>;

	/// Creates a text node.
	fn create_text_node(&self, text: &str) -> Self::Node;
}

/// A handle to a live node in the host tree.
///
/// Clones refer to the same live node. Mutations take `&self`: the host tree
/// has a single logical writer at a time, the reconciliation call currently
/// operating on the node.
pub trait HostNode: Clone + 'static {
	/// Appends `child`, detaching it from its current parent first.
	///
	/// Appending a node into its own subtree is refused.
	fn append_child(&self, child: &Self);

	/// Detaches `child` from this node.
	fn remove_child(&self, child: &Self) -> HostResult<()>;

	/// The current parent, if attached.
	fn parent_node(&self) -> Option<Self>;

	/// Namespace URI of an element node.
	fn namespace_uri(&self) -> Option<String>;

	/// Returns an attribute value.
	fn attribute(&self, name: &str) -> Option<String>;

	/// Sets an attribute.
	fn set_attribute(&self, name: &str, value: &str) -> HostResult<()>;

	/// Removes an attribute. Removing a missing attribute is a no-op.
	fn remove_attribute(&self, name: &str);

	/// Returns a property value.
	fn property(&self, name: &str) -> Option<PropValue<Self>>;

	/// Assigns a property. Fails for properties the host treats as read-only.
	fn set_property(&self, name: &str, value: &PropValue<Self>) -> HostResult<()>;

	/// Assigns the class list property.
	fn set_class_name(&self, class_name: &str);

	/// Returns an inline style declaration.
	fn style_property(&self, name: &str) -> Option<String>;

	/// Assigns an inline style declaration; an empty value clears it.
	fn set_style_property(&self, name: &str, value: &str);

	/// Replaces the node's content with raw markup.
	fn set_inner_html(&self, html: &str);

	/// Installs (`Some`) or clears (`None`) the listener property for `event`
	/// (lowercase event name without the `on` prefix). At most one listener per
	/// event name; installing overwrites.
	fn set_event_listener(&self, event: &str, handler: Option<EventHandler<Self>>);

	/// Whether a ref callback was already attached to this node.
	fn has_node_ref(&self) -> bool;

	/// Attaches the ref marker.
	fn attach_node_ref(&self, callback: NodeCallback<Self>);
}
