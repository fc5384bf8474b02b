//! Path parsing and resolution over the document tree
//!
//! Paths are slash-separated. A segment is a map key, `[]` for the first
//! element of a sequence, or `[N]` for the N-th element (0-based). Paths that
//! start with `JsonPath:` or `$.` use the dot dialect (`$.a.b[0]`), which is
//! normalized to the slash form (`a/b/[0]`) before walking.

use crate::core::value::{Node, NodeType};
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

const JSONPATH_PREFIX: &str = "JsonPath:";
const DOLLAR_PREFIX: &str = "$.";
const FIRST_ELEMENT: &str = "[]";

static INDEX_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([0-9]+)\]$").unwrap());

/// Why a path did not resolve to a node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("key '{segment}' does not exist")]
    MissingKey { segment: String },

    #[error("sequence is empty, cannot select '{segment}'")]
    EmptySequence { segment: String },

    #[error("'{segment}' is not a sequence index")]
    InvalidIndex { segment: String },

    #[error("index '{segment}' is out of range for a sequence of {len} elements")]
    IndexOutOfRange { segment: String, len: usize },

    #[error("cannot descend into a {found} node with '{segment}'")]
    ScalarDescent { segment: String, found: NodeType },
}

impl LookupError {
    /// The path segment at which resolution stopped
    pub fn segment(&self) -> &str {
        match self {
            Self::MissingKey { segment }
            | Self::EmptySequence { segment }
            | Self::InvalidIndex { segment }
            | Self::IndexOutOfRange { segment, .. }
            | Self::ScalarDescent { segment, .. } => segment,
        }
    }
}

/// A path split into its normalized segments
///
/// Parsing never fails and always yields at least one segment; the empty
/// path is the single segment `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedPath {
    segments: Vec<String>,
}

impl ParsedPath {
    pub fn parse(path: &str) -> Self {
        let segments = normalize(path).split('/').map(str::to_string).collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ParsedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl From<&str> for ParsedPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Strip a dialect prefix, convert dots and brackets to slash form, collapse
/// repeated slashes and drop leading ones
pub fn normalize(path: &str) -> String {
    let mut rest = path;
    let mut dialect = false;

    if rest.len() > JSONPATH_PREFIX.len() && rest.starts_with(JSONPATH_PREFIX) {
        rest = &rest[JSONPATH_PREFIX.len()..];
        dialect = true;
    }
    if rest.len() > DOLLAR_PREFIX.len() && rest.starts_with(DOLLAR_PREFIX) {
        rest = &rest[DOLLAR_PREFIX.len()..];
        dialect = true;
    }

    let converted = if dialect {
        rest.replace('.', "/").replace('[', "/[")
    } else {
        rest.to_string()
    };

    let mut normalized = String::with_capacity(converted.len());
    for ch in converted.chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }

    normalized.trim_start_matches('/').to_string()
}

/// Interpret a segment as a sequence index: `[]` is 0, `[N]` is N
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment == FIRST_ELEMENT {
        return Some(0);
    }
    INDEX_SEGMENT
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Walk `path` from `root` and return the node its last segment selects
pub fn resolve<'a>(root: &'a Node, path: &ParsedPath) -> Result<&'a Node, LookupError> {
    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        current = step(current, segment)?;
        trace!("resolved segment {} '{}' to {}", depth, segment, current.node_type());
    }
    Ok(current)
}

fn step<'a>(node: &'a Node, segment: &str) -> Result<&'a Node, LookupError> {
    match node {
        Node::Map(map) => map.get(segment).ok_or_else(|| LookupError::MissingKey {
            segment: segment.to_string(),
        }),
        Node::Sequence(items) => {
            if items.is_empty() {
                return Err(LookupError::EmptySequence {
                    segment: segment.to_string(),
                });
            }
            let index = parse_index(segment).ok_or_else(|| LookupError::InvalidIndex {
                segment: segment.to_string(),
            })?;
            items.get(index).ok_or_else(|| LookupError::IndexOutOfRange {
                segment: segment.to_string(),
                len: items.len(),
            })
        }
        Node::String(_)
        | Node::Integer(_)
        | Node::Float(_)
        | Node::Boolean(_)
        | Node::Timestamp(_)
        | Node::Null => Err(LookupError::ScalarDescent {
            segment: segment.to_string(),
            found: node.node_type(),
        }),
    }
}
