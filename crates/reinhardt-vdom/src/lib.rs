//! Reinhardt VDOM - Virtual Node Reconciliation Engine
//!
//! A minimal engine that turns declarative virtual nodes into a live host
//! tree and keeps that tree in sync, one element at a time.
//!
//! ## Features
//!
//! - **Leaf-level primitives**: materialize, update and remove single elements;
//!   child diffing is left to the caller's differ
//! - **Deterministic ordering**: properties before children, children before
//!   `onCreate`, directive `onremove` before `onRemove` before detachment
//! - **Directive plugins**: an extensible `{prefix}{name}` protocol with a
//!   mandatory creation hook and optional update/removal hooks
//! - **Host abstraction**: the reconciler only talks to the [`host::Document`]
//!   and [`host::HostNode`] traits, with an in-memory host for tests and
//!   tooling and a `web-sys` host on `wasm32`
//! - **Controlled inputs**: `value` and `checked` are compared against the live
//!   node so direct user edits are corrected on the next update
//!
//! ## Architecture
//!
//! - [`vnode`]: virtual nodes, property mappings and builders
//! - [`value`]: property values and their truthiness
//! - [`callback`]: refs, lifecycle hooks and event handlers
//! - [`reconciler`]: the materializer, updater, remover and property reconciler
//! - [`directive`]: the directive protocol and an in-memory registry
//! - [`host`]: host traits and the bundled hosts
//! - [`compose`]: right-to-left function composition
//! - [`config`]: TOML-loadable settings
//!
//! ## Example
//!
//! ```
//! use reinhardt_vdom::prelude::*;
//!
//! let document = MemoryDocument::new();
//! let reconciler = Reconciler::new(&document, &NoDirectives);
//! let app = document.create_element("main").unwrap();
//!
//! let view: VNode<MemoryNode> = VElement::new("button")
//!     .class("primary")
//!     .on("click", |event| event.prevent_default())
//!     .child("Save")
//!     .into();
//! let button = reconciler.materialize(&view, false);
//! app.append_child(&button);
//!
//! assert_eq!(app.to_html(), r#"<main><button class="primary">Save</button></main>"#);
//! assert!(button.dispatch("click").unwrap().is_default_prevented());
//!
//! reconciler.remove(&app, &button, view.attributes().unwrap());
//! assert_eq!(app.child_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod callback;
pub mod compose;
pub mod config;
pub mod directive;
pub mod error;
pub mod host;
pub mod reconciler;
pub mod value;
pub mod vnode;

mod util;

pub use callback::{Callback, Event, EventHandler, NodeCallback};
pub use compose::{Transform, compose, compose2};
pub use config::VdomConfig;
pub use directive::{
	Directive, DirectiveBinding, DirectiveHandler, DirectiveLookup, DirectiveRegistry, NoDirectives,
};
pub use error::{ConfigError, HostError, HostResult};
pub use host::{Document, HostNode};
pub use reconciler::{PropKind, Reconciler};
pub use value::{PropValue, RawHtml, StyleMap};
pub use vnode::{IntoVNode, Props, VElement, VNode, get_key};

/// Commonly used types and functions.
pub mod prelude {
	pub use crate::callback::{Callback, Event, EventHandler, NodeCallback};
	pub use crate::compose::{Transform, compose, compose2};
	pub use crate::config::VdomConfig;
	pub use crate::directive::{
		DirectiveBinding, DirectiveHandler, DirectiveLookup, DirectiveRegistry, NoDirectives,
	};
	pub use crate::host::memory::{MemoryDocument, MemoryNode};
	pub use crate::host::{Document, HostNode};
	pub use crate::reconciler::Reconciler;
	pub use crate::value::{PropValue, RawHtml, StyleMap};
	pub use crate::vnode::{IntoVNode, Props, VElement, VNode, get_key};
}
