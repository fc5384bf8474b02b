//! Per-document configuration
//!
//! A [`Config`] is attached to every [`crate::core::Document`] and passed by
//! reference into queries and generators. Documents with different settings
//! can coexist; there is no process-wide configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Toggles consumed by the resolver, the accessors and both generators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Type tag returned by queries when a node is missing or mistyped
    pub not_found_marker: String,
    /// Indent added for each nested map level in YAML output
    pub yaml_indent: String,
    /// Quote every string in YAML output
    pub force_yaml_quotes: bool,
    /// Map keys emitted first, in this order, by both generators
    pub preferred_key_order: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            not_found_marker: "none".to_string(),
            yaml_indent: "  ".to_string(),
            force_yaml_quotes: false,
            preferred_key_order: Vec::new(),
        }
    }
}

impl Config {
    /// Load a configuration from YAML text; missing fields keep their defaults
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a configuration from JSON text; missing fields keep their defaults
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builder-style setter for the preferred key order
    pub fn with_key_order<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_key_order = keys.into_iter().map(Into::into).collect();
        self
    }
}

/// Where a document's tree came from
///
/// Only affects YAML rendering of whole-number floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    Json,
    Yaml,
    /// Built in code rather than parsed
    #[default]
    Unknown,
}

impl SourceFormat {
    /// Detect the format from a file extension (`.json`, `.yaml`, `.yml`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
