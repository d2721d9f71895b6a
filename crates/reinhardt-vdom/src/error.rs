//! Error types for host operations and configuration loading.
//!
//! Reconciliation itself never fails: every [`HostError`] raised by a host is
//! recovered inside the reconciler (attribute fallback, logged no-op). These
//! types are only surfaced by the host traits and by [`VdomConfig`] loading.
//!
//! [`VdomConfig`]: crate::config::VdomConfig

use thiserror::Error;

/// Result type for host tree operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors reported by a host rendering environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HostError {
	/// The host refused a direct property write.
	#[error("property '{0}' is read-only")]
	ReadOnlyProperty(String),

	/// The node to detach is not a child of the given parent.
	#[error("node is not a child of the given parent")]
	NotAChild,

	/// An element-only operation was attempted on a text node.
	#[error("operation requires an element node")]
	NotAnElement,

	/// A tag or attribute name the host cannot represent.
	#[error("invalid name: {0:?}")]
	InvalidName(String),

	/// Window object not available.
	#[error("window object not available")]
	NoWindow,

	/// Document object not available.
	#[error("document object not available")]
	NoDocument,

	/// An exception thrown by the JavaScript host.
	#[error("javascript error: {0}")]
	Js(String),
}

/// Errors raised while loading a [`VdomConfig`](crate::config::VdomConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// The TOML source could not be parsed into a configuration.
	#[error("invalid vdom configuration: {0}")]
	Parse(#[from] toml::de::Error),
}
