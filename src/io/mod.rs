pub mod float;
pub mod fs;
pub mod json_writer;
pub mod reader;
pub mod yaml_writer;

pub use fs::{read_document, resolve_files, write_atomic};
pub use json_writer::JsonWriter;
pub use reader::{parse_json, parse_yaml};
pub use yaml_writer::{YamlContext, YamlWriter};

use crate::core::value::{Node, NodeMap};
use std::collections::HashSet;

/// Map entries in output order: preferred keys first (each once), then the
/// remaining keys in map order
pub(crate) fn ordered_entries<'a>(
    map: &'a NodeMap,
    preferred: &'a [String],
) -> Vec<(&'a str, &'a Node)> {
    let mut done: HashSet<&str> = HashSet::new();
    let mut entries = Vec::with_capacity(map.len());

    for key in preferred {
        if let Some((k, v)) = map.get_key_value(key.as_str()) {
            if done.insert(k.as_str()) {
                entries.push((k.as_str(), v));
            }
        }
    }
    for (k, v) in map {
        if done.insert(k.as_str()) {
            entries.push((k.as_str(), v));
        }
    }
    entries
}
