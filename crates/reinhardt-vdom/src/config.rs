//! Reconciler configuration.
//!
//! Defaults match the browser DOM. A configuration can be loaded from TOML,
//! either at the top level or under a `[vdom]` table so it can live in a
//! larger project settings file:
//!
//! ```toml
//! [vdom]
//! svg_root_tag = "svg"
//! controlled_properties = ["value", "checked", "selected"]
//! directive_prefix = "x-"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Namespace URI used for SVG elements.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Settings consulted by the reconciler and the bundled directive registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VdomConfig {
	/// Namespace URI for elements inside an SVG subtree.
	pub svg_namespace: String,
	/// Tag that enters the SVG namespace.
	pub svg_root_tag: String,
	/// Keys compared against the live node's property instead of the old
	/// virtual value during updates.
	pub controlled_properties: Vec<String>,
	/// Prefix marking directive keys for [`DirectiveRegistry`](crate::directive::DirectiveRegistry).
	pub directive_prefix: String,
}

impl Default for VdomConfig {
	fn default() -> Self {
		Self {
			svg_namespace: SVG_NAMESPACE.to_string(),
			svg_root_tag: "svg".to_string(),
			controlled_properties: vec!["value".to_string(), "checked".to_string()],
			directive_prefix: "v-".to_string(),
		}
	}
}

impl VdomConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a configuration from TOML.
	///
	/// Missing fields take their default value. When the document has a
	/// `[vdom]` table, only that table is read.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let mut table: toml::Table = toml::from_str(source)?;
		let config: Self = match table.remove("vdom") {
			Some(section) => section.try_into()?,
			None => toml::Value::Table(table).try_into()?,
		};
		Ok(config)
	}

	/// Sets the SVG namespace URI.
	pub fn svg_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.svg_namespace = namespace.into();
		self
	}

	/// Sets the tag that enters the SVG namespace.
	pub fn svg_root_tag(mut self, tag: impl Into<String>) -> Self {
		self.svg_root_tag = tag.into();
		self
	}

	/// Replaces the controlled property list.
	pub fn controlled_properties<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.controlled_properties = keys.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the directive key prefix.
	pub fn directive_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.directive_prefix = prefix.into();
		self
	}

	/// Whether `key` is compared against the live property during updates.
	pub fn is_controlled(&self, key: &str) -> bool {
		self.controlled_properties.iter().any(|k| k == key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let config = VdomConfig::default();

		assert_eq!(config.svg_namespace, SVG_NAMESPACE);
		assert_eq!(config.svg_root_tag, "svg");
		assert!(config.is_controlled("value"));
		assert!(config.is_controlled("checked"));
		assert!(!config.is_controlled("selected"));
		assert_eq!(config.directive_prefix, "v-");
	}

	#[rstest]
	fn test_from_toml_top_level() {
		let config = VdomConfig::from_toml_str("directive_prefix = \"x-\"").unwrap();

		assert_eq!(config.directive_prefix, "x-");
		assert_eq!(config.svg_root_tag, "svg");
	}

	#[rstest]
	fn test_from_toml_section() {
		let source = r#"
			[server]
			port = 8000

			[vdom]
			controlled_properties = ["value", "checked", "selected"]
		"#;
		let config = VdomConfig::from_toml_str(source).unwrap();

		assert!(config.is_controlled("selected"));
		assert_eq!(config.directive_prefix, "v-");
	}

	#[rstest]
	fn test_from_toml_empty_document() {
		assert_eq!(VdomConfig::from_toml_str("").unwrap(), VdomConfig::default());
	}

	#[rstest]
	#[case("svg_root_tag = 3")]
	#[case("[vdom]\ncontrolled_properties = \"value\"")]
	#[case("not toml at all")]
	fn test_from_toml_invalid(#[case] source: &str) {
		assert!(VdomConfig::from_toml_str(source).is_err());
	}

	#[rstest]
	fn test_builder() {
		let config = VdomConfig::new()
			.svg_root_tag("math")
			.svg_namespace("http://www.w3.org/1998/Math/MathML")
			.controlled_properties(["value"])
			.directive_prefix("x-");

		assert_eq!(config.svg_root_tag, "math");
		assert!(!config.is_controlled("checked"));
		assert_eq!(config.directive_prefix, "x-");
	}
}
