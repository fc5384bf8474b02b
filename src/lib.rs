//! docpath: query JSON and YAML documents by path and re-emit them as text
//!
//! This library parses JSON or YAML into a typed node tree, resolves
//! slash-separated paths against it, and renders the tree (or any subtree)
//! back out as JSON or YAML with configurable formatting. It is both a
//! standalone library and the foundation for the `docpath` CLI.
//!
//! # Features
//!
//! - **Typed node tree** with a closed set of variants and source key order
//! - **Two path dialects**: `user/tags/[0]` and `$.user.tags[0]`
//! - **Tagged accessors** that report the discovered type or a configurable
//!   not-found marker, plus `Option`/`Result` lookups that keep the cause
//! - **Deterministic generators** for indented JSON, compact JSON and YAML
//! - **Per-document configuration**; no global state
//!
//! # Quick Start
//!
//! ## Querying
//!
//! ```rust
//! use docpath::{parse_json, Result};
//!
//! fn main() -> Result<()> {
//!     let doc = parse_json(r#"{"user": {"name": "Bob", "age": 30}}"#)?;
//!
//!     assert_eq!(doc.get_string_by_path("user/name"), ("Bob", "string"));
//!     assert_eq!(doc.get_integer_by_path("$.user.age"), (30, "int"));
//!     assert_eq!(doc.get_string_by_path("user/missing"), ("", "none"));
//!     assert!(!doc.node_exists("user/missing"));
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use docpath::{parse_yaml, Config, Result};
//!
//! fn main() -> Result<()> {
//!     let config = Config::default().with_key_order(["id"]);
//!     let doc = parse_yaml("name: widget\nid: 7\n")?.with_config(config);
//!
//!     assert_eq!(doc.json_compacted(), r#"{"id":7,"name":"widget"}"#);
//!     assert_eq!(doc.yaml(), "---\nid: 7\nname: widget\n\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Files
//!
//! ```rust,no_run
//! use docpath::{read_document, resolve_files, write_atomic, Result};
//!
//! fn main() -> Result<()> {
//!     for file in resolve_files(&["config/", "settings.json"])? {
//!         let doc = read_document(&file)?;
//!         write_atomic(file.with_extension("yaml"), &doc.yaml())?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`](crate::core): the node tree, paths, configuration and [`Document`]
//! - [`io`]: parsing, the JSON and YAML generators, and file helpers
//! - [`error`]: error types for the fallible surfaces

// Public API exports
pub use crate::error::{DocPathError, Result};

// Core types
pub use crate::core::{
    Config, Document, LookupError, Node, NodeMap, NodeType, ParsedPath, SourceFormat,
};

// IO types
pub use crate::io::{
    parse_json, parse_yaml, read_document, resolve_files, write_atomic, JsonWriter, YamlContext,
    YamlWriter,
};

pub mod core;
pub mod error;
pub mod io;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_to_yaml() {
        let doc = parse_json(
            r#"{"name": "docpath", "version": 1.0, "tags": ["json", "yaml"], "meta": {"stable": false}}"#,
        )
        .unwrap();
        let expected = "---\nname: docpath\nversion: 1\ntags:\n- json\n- yaml\nmeta:\n  stable: false\n\n";
        assert_eq!(doc.yaml(), expected);
    }

    #[test]
    fn test_yaml_to_json() {
        let doc = parse_yaml("name: docpath\nitems:\n  - id: 1\n  - id: 2\n").unwrap();
        let expected = "{\n  \"name\":\"docpath\",\n  \"items\":[\n    {\n      \"id\":1\n    },\n    {\n      \"id\":2\n    }\n  ]\n}\n";
        assert_eq!(doc.json_indented(), expected);
    }

    #[test]
    fn test_subtree_render() {
        let doc = parse_yaml("server:\n  host: localhost\n  port: 8080\n").unwrap();
        let (server, tag) = doc.get_subtree_by_path("server");
        assert_eq!(tag, "map");
        assert_eq!(server.json_compacted(), r#"{"host":"localhost","port":8080}"#);
    }
}
