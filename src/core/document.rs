//! The queryable document
//!
//! A [`Document`] owns a [`Node`] tree, the format it was parsed from and the
//! [`Config`] that drives lookups and rendering. Queries come in three
//! flavours:
//!
//! - tagged accessors (`get_string_by_path` and friends) that return a value
//!   together with a type tag, or the zero value and the configured
//!   not-found marker;
//! - `*_with_default` accessors that fall back to a caller-supplied value;
//! - [`Document::get`], [`Document::lookup`] and [`Document::require`] for
//!   callers that prefer `Option`/`Result`.

use crate::core::config::{Config, SourceFormat};
use crate::core::path::{resolve, LookupError, ParsedPath};
use crate::core::value::{Node, NodeMap, NodeType};
use crate::error::{DocPathError, Result};
use crate::io::{parse_json, parse_yaml, JsonWriter, YamlWriter};
use chrono::NaiveDateTime;
use log::debug;

/// A node tree together with its source format and configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
    source_format: SourceFormat,
    config: Config,
}

impl Document {
    /// Create a document with the default configuration
    pub fn new(root: Node, source_format: SourceFormat) -> Self {
        Self {
            root,
            source_format,
            config: Config::default(),
        }
    }

    /// Replace the configuration, builder style
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Parse text in the given format. Unknown formats are read as YAML,
    /// which also accepts JSON.
    pub fn parse(text: &str, format: SourceFormat) -> Result<Self> {
        match format {
            SourceFormat::Json => parse_json(text),
            SourceFormat::Yaml | SourceFormat::Unknown => parse_yaml(text),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Consume the document and return its tree
    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    fn marker(&self) -> &str {
        &self.config.not_found_marker
    }

    /// Resolve `path`, reporting why it failed
    pub fn lookup(&self, path: &str) -> std::result::Result<&Node, LookupError> {
        let parsed = ParsedPath::parse(path);
        resolve(&self.root, &parsed).map_err(|err| {
            debug!("lookup of '{}' failed: {}", path, err);
            err
        })
    }

    /// Resolve `path` to a node, if there is one
    pub fn get(&self, path: &str) -> Option<&Node> {
        self.lookup(path).ok()
    }

    /// Resolve `path` or fail with [`DocPathError::NotFound`]
    pub fn require(&self, path: &str) -> Result<&Node> {
        self.lookup(path)
            .map_err(|source| DocPathError::not_found(path, source))
    }

    /// Resolve `path` to the node and its type tag, or `None` and the
    /// not-found marker
    pub fn get_node_by_path(&self, path: &str) -> (Option<&Node>, &str) {
        match self.get(path) {
            Some(node) => (Some(node), node.node_type().as_str()),
            None => (None, self.marker()),
        }
    }

    /// Whether the type tag for `path` differs from the not-found marker
    pub fn node_exists(&self, path: &str) -> bool {
        self.get_node_by_path(path).1 != self.marker()
    }

    /// Pair an accessor result with its type tag, or the zero value with
    /// the marker
    fn tagged<'a, T>(&'a self, value: Option<T>, tag: NodeType, zero: T) -> (T, &'a str) {
        match value {
            Some(value) => (value, tag.as_str()),
            None => (zero, self.marker()),
        }
    }

    pub fn get_string_by_path(&self, path: &str) -> (&str, &str) {
        let value = self.get(path).and_then(Node::as_str);
        self.tagged(value, NodeType::String, "")
    }

    pub fn get_string_by_path_with_default<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        self.get(path).and_then(Node::as_str).unwrap_or(default)
    }

    /// Only `float64` nodes match; integers are not widened
    pub fn get_float64_by_path(&self, path: &str) -> (f64, &str) {
        let value = self.get(path).and_then(Node::as_f64);
        self.tagged(value, NodeType::Float, 0.0)
    }

    pub fn get_float64_by_path_with_default(&self, path: &str, default: f64) -> f64 {
        self.get(path).and_then(Node::as_f64).unwrap_or(default)
    }

    /// Only `int` nodes match; floats are never truncated
    pub fn get_integer_by_path(&self, path: &str) -> (i64, &str) {
        let value = self.get(path).and_then(Node::as_i64);
        self.tagged(value, NodeType::Int, 0)
    }

    pub fn get_integer_by_path_with_default(&self, path: &str, default: i64) -> i64 {
        self.get(path).and_then(Node::as_i64).unwrap_or(default)
    }

    /// Either numeric type as `f64`, tagged with the type that was found
    pub fn get_number_by_path(&self, path: &str) -> (f64, &str) {
        match self.get(path) {
            Some(node) => match node.as_number() {
                Some(number) => (number, node.node_type().as_str()),
                None => (0.0, self.marker()),
            },
            None => (0.0, self.marker()),
        }
    }

    pub fn get_number_by_path_with_default(&self, path: &str, default: f64) -> f64 {
        self.get(path).and_then(Node::as_number).unwrap_or(default)
    }

    pub fn get_bool_by_path(&self, path: &str) -> (bool, &str) {
        let value = self.get(path).and_then(Node::as_bool);
        self.tagged(value, NodeType::Bool, false)
    }

    pub fn get_bool_by_path_with_default(&self, path: &str, default: bool) -> bool {
        self.get(path).and_then(Node::as_bool).unwrap_or(default)
    }

    pub fn get_time_by_path(&self, path: &str) -> (NaiveDateTime, &str) {
        let value = self.get(path).and_then(Node::as_timestamp);
        self.tagged(value, NodeType::Time, NaiveDateTime::default())
    }

    pub fn get_time_by_path_with_default(
        &self,
        path: &str,
        default: NaiveDateTime,
    ) -> NaiveDateTime {
        self.get(path).and_then(Node::as_timestamp).unwrap_or(default)
    }

    pub fn get_map_by_path(&self, path: &str) -> (Option<&NodeMap>, &str) {
        match self.get(path).and_then(Node::as_map) {
            Some(map) => (Some(map), NodeType::Map.as_str()),
            None => (None, self.marker()),
        }
    }

    pub fn get_array_by_path(&self, path: &str) -> (Option<&[Node]>, &str) {
        match self.get(path).and_then(Node::as_sequence) {
            Some(items) => (Some(items), NodeType::Array.as_str()),
            None => (None, self.marker()),
        }
    }

    /// Number of keys or elements at `path`; 0 for scalars and missing nodes
    pub fn get_count_descendants_by_path(&self, path: &str) -> usize {
        self.get(path).map(Node::descendant_count).unwrap_or(0)
    }

    /// A new document rooted at a copy of the node at `path`
    ///
    /// The subtree gets a default [`Config`], not this document's; only the
    /// source format carries over. A missing node yields a null root and the
    /// not-found marker.
    pub fn get_subtree_by_path(&self, path: &str) -> (Document, &str) {
        match self.get(path) {
            Some(node) => (
                Document::new(node.clone(), self.source_format),
                node.node_type().as_str(),
            ),
            None => (
                Document::new(Node::Null, self.source_format),
                self.marker(),
            ),
        }
    }

    /// The whole tree as YAML, with a trailing newline
    pub fn yaml(&self) -> String {
        let mut out = YamlWriter::new(&self.config, self.source_format).render(&self.root);
        out.push('\n');
        out
    }

    /// The whole tree as indented JSON, with a trailing newline
    pub fn json_indented(&self) -> String {
        let mut out = JsonWriter::new(&self.config, true).render(&self.root);
        out.push('\n');
        out
    }

    /// The whole tree as compact JSON
    pub fn json_compacted(&self) -> String {
        JsonWriter::new(&self.config, false).render(&self.root)
    }
}
