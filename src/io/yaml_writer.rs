//! YAML text generation
//!
//! Block-style output: a `---` document marker, maps as `key: value` lines
//! indented by [`Config::yaml_indent`] per nesting level, sequences as `- `
//! lines. Strings are quoted only when they could be misread (see
//! [`needs_quotes`]).

use crate::core::config::{Config, SourceFormat};
use crate::core::value::{format_timestamp, Node};
use crate::io::float::format_float;
use crate::io::json_writer::escape_quotes;
use crate::io::ordered_entries;

const DOCUMENT_START: &str = "---\n";
const DASH: &str = "- ";
const DASH_INDENT: &str = "  ";

/// Characters whose presence forces a string to be quoted
const QUOTE_TRIGGERS: &[char] = &[
    '"', '\\', ':', '@', ',', '&', '*', '#', '?', '-', '!', '%', '<', '>', ']', '{', '}',
];

/// What encloses the node being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YamlContext {
    /// The document root
    Top,
    /// The value of a map entry
    Map,
    /// An element of a sequence
    Array,
    /// Any other position
    Scalar,
}

/// YAML generator bound to a configuration and the document's source format
#[derive(Debug, Clone, Copy)]
pub struct YamlWriter<'a> {
    config: &'a Config,
    source_format: SourceFormat,
}

impl<'a> YamlWriter<'a> {
    pub fn new(config: &'a Config, source_format: SourceFormat) -> Self {
        Self {
            config,
            source_format,
        }
    }

    /// Render a whole document, starting with the `---` marker
    pub fn render(&self, node: &Node) -> String {
        self.render_fragment(node, "", YamlContext::Top)
    }

    /// Render a node as if it appeared at `indent` inside `context`
    pub fn render_fragment(&self, node: &Node, indent: &str, context: YamlContext) -> String {
        let mut out = String::new();
        self.write_node(node, indent, context, &mut out);
        out
    }

    fn write_node(&self, node: &Node, indent: &str, parent: YamlContext, out: &mut String) {
        if parent == YamlContext::Top {
            out.push_str(DOCUMENT_START);
        }

        match node {
            Node::Map(map) if map.is_empty() => self.write_flow("{}", parent, out),
            Node::Sequence(items) if items.is_empty() => self.write_flow("[]", parent, out),
            Node::Map(map) => {
                let child_indent = if parent == YamlContext::Map {
                    out.push('\n');
                    format!("{}{}", indent, self.config.yaml_indent)
                } else {
                    indent.to_string()
                };
                for (i, (key, value)) in ordered_entries(map, &self.config.preferred_key_order)
                    .into_iter()
                    .enumerate()
                {
                    // the sequence dash already indents the first key
                    if parent != YamlContext::Array || i != 0 {
                        out.push_str(&child_indent);
                    }
                    out.push_str(key);
                    out.push(':');
                    self.write_node(value, &child_indent, YamlContext::Map, out);
                }
            }
            Node::Sequence(items) => {
                if parent == YamlContext::Map {
                    out.push('\n');
                }
                let child_indent = format!("{}{}", indent, DASH_INDENT);
                for (i, item) in items.iter().enumerate() {
                    if parent != YamlContext::Array || i != 0 {
                        out.push_str(indent);
                    }
                    out.push_str(DASH);
                    self.write_node(item, &child_indent, YamlContext::Array, out);
                }
            }
            Node::Null => out.push('\n'),
            Node::String(_)
            | Node::Integer(_)
            | Node::Float(_)
            | Node::Boolean(_)
            | Node::Timestamp(_) => self.write_flow(&self.scalar(node), parent, out),
        }
    }

    /// A single-line value; a leading space unless it follows a dash
    fn write_flow(&self, text: &str, parent: YamlContext, out: &mut String) {
        if parent != YamlContext::Array {
            out.push(' ');
        }
        out.push_str(text);
        out.push('\n');
    }

    fn scalar(&self, node: &Node) -> String {
        match node {
            Node::String(s) => quote_string(s, self.config.force_yaml_quotes),
            Node::Integer(i) => i.to_string(),
            Node::Float(f) => {
                if self.source_format == SourceFormat::Json
                    && f.fract() == 0.0
                    && *f >= i64::MIN as f64
                    && *f <= i64::MAX as f64
                {
                    (*f as i64).to_string()
                } else {
                    format_float(*f)
                }
            }
            Node::Boolean(b) => b.to_string(),
            Node::Timestamp(t) => format!("\"{}\"", format_timestamp(t)),
            Node::Map(_) | Node::Sequence(_) | Node::Null => String::new(),
        }
    }
}

/// Whether a plain YAML scalar would be misread or invalid for `s`
pub fn needs_quotes(s: &str) -> bool {
    s.contains(QUOTE_TRIGGERS)
        || s.contains("[:")
        || s == "Yes"
        || s == "No"
        || s.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
}

/// Render a string scalar, quoting when needed or forced
pub fn quote_string(s: &str, force: bool) -> String {
    let escaped = escape_quotes(s);
    if force || needs_quotes(s) {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}
