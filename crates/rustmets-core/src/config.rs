//! RustMETS configuration.
//!
//! Provides [`RustMetsConfig`], loaded from environment variables and turned
//! into the reader and writer options of the XML engine.

use rustmets_xml::ns::METS_SCHEMA_LOCATION;
use rustmets_xml::{ReaderOptions, WriterOptions};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{RustMetsError, RustMetsResult};

/// RustMETS configuration.
///
/// # Examples
///
/// ```
/// use rustmets_core::RustMetsConfig;
///
/// let config = RustMetsConfig::default();
/// assert_eq!(config.indent, 2);
/// assert!(config.xml_declaration);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct RustMetsConfig {
    /// Spaces per indentation level on write; `0` writes compact output.
    #[builder(default = 2)]
    pub indent: usize,

    /// Whether to emit the XML declaration.
    #[builder(default = true)]
    pub xml_declaration: bool,

    /// Value of `xsi:schemaLocation` on the root element.
    #[builder(default = String::from(METS_SCHEMA_LOCATION))]
    pub schema_location: String,

    /// Maximum element nesting accepted on read.
    #[builder(default = 512)]
    pub max_depth: usize,

    /// Length of minted identifiers.
    #[builder(default = 8)]
    pub id_length: usize,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for RustMetsConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
            schema_location: String::from(METS_SCHEMA_LOCATION),
            max_depth: 512,
            id_length: 8,
            log_level: String::from("info"),
        }
    }
}

impl RustMetsConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `RUSTMETS_INDENT` | `2` |
    /// | `RUSTMETS_XML_DECLARATION` | `true` |
    /// | `RUSTMETS_SCHEMA_LOCATION` | METS schema location |
    /// | `RUSTMETS_MAX_DEPTH` | `512` |
    /// | `RUSTMETS_ID_LENGTH` | `8` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// Unparseable numbers keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("RUSTMETS_INDENT") {
            if let Ok(n) = v.parse::<usize>() {
                config.indent = n;
            }
        }
        if let Ok(v) = std::env::var("RUSTMETS_XML_DECLARATION") {
            config.xml_declaration = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("RUSTMETS_SCHEMA_LOCATION") {
            config.schema_location = v;
        }
        if let Ok(v) = std::env::var("RUSTMETS_MAX_DEPTH") {
            if let Ok(n) = v.parse::<usize>() {
                config.max_depth = n;
            }
        }
        if let Ok(v) = std::env::var("RUSTMETS_ID_LENGTH") {
            if let Ok(n) = v.parse::<usize>() {
                config.id_length = n;
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// Reject settings the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`RustMetsError::Config`] for a zero depth limit or an empty
    /// schema location.
    pub fn validate(&self) -> RustMetsResult<()> {
        if self.max_depth == 0 {
            return Err(RustMetsError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.schema_location.trim().is_empty() {
            return Err(RustMetsError::Config(
                "schema_location must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Options for [`rustmets_xml::MetsReader`].
    #[must_use]
    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            max_depth: self.max_depth,
        }
    }

    /// Options for [`rustmets_xml::MetsWriter`].
    #[must_use]
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            indent: self.indent,
            declaration: self.xml_declaration,
            schema_location: self.schema_location.clone(),
        }
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
