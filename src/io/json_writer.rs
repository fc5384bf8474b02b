//! JSON text generation
//!
//! Renders a [`Node`] tree as compact or indented JSON. Map keys listed in
//! [`Config::preferred_key_order`] are written first; escaping is limited to
//! double quotes.

use crate::core::config::Config;
use crate::core::value::{format_timestamp, Node};
use crate::io::float::format_float;
use crate::io::ordered_entries;

const STEP: &str = "  ";

/// JSON generator bound to a configuration
#[derive(Debug, Clone, Copy)]
pub struct JsonWriter<'a> {
    config: &'a Config,
    pretty: bool,
}

impl<'a> JsonWriter<'a> {
    pub fn new(config: &'a Config, pretty: bool) -> Self {
        Self { config, pretty }
    }

    /// Render a whole tree, without a trailing newline
    pub fn render(&self, node: &Node) -> String {
        self.render_at(node, "")
    }

    /// Render a subtree as if it were nested at `indent`
    pub fn render_at(&self, node: &Node, indent: &str) -> String {
        let mut out = String::new();
        self.write_node(node, indent, &mut out);
        out
    }

    fn write_node(&self, node: &Node, indent: &str, out: &mut String) {
        match node {
            Node::Map(map) => {
                if map.is_empty() {
                    out.push_str("{}");
                    return;
                }
                let child_indent = format!("{}{}", indent, STEP);
                self.open('{', indent, out);
                for (i, (key, value)) in ordered_entries(map, &self.config.preferred_key_order)
                    .into_iter()
                    .enumerate()
                {
                    if i > 0 {
                        self.separator(indent, out);
                    }
                    out.push('"');
                    out.push_str(&escape_quotes(key));
                    out.push_str("\":");
                    self.write_node(value, &child_indent, out);
                }
                self.close('}', indent, out);
            }
            Node::Sequence(items) => {
                if items.is_empty() {
                    out.push_str("[]");
                    return;
                }
                let child_indent = format!("{}{}", indent, STEP);
                self.open('[', indent, out);
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.separator(indent, out);
                    }
                    self.write_node(item, &child_indent, out);
                }
                self.close(']', indent, out);
            }
            Node::String(s) => {
                out.push('"');
                out.push_str(&escape_quotes(s));
                out.push('"');
            }
            Node::Integer(i) => out.push_str(&i.to_string()),
            Node::Float(f) => out.push_str(&format_float(*f)),
            Node::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Node::Timestamp(t) => {
                out.push('"');
                out.push_str(&format_timestamp(t));
                out.push('"');
            }
            Node::Null => out.push_str("null"),
        }
    }

    fn open(&self, bracket: char, indent: &str, out: &mut String) {
        out.push(bracket);
        if self.pretty {
            out.push('\n');
            out.push_str(indent);
            out.push_str(STEP);
        }
    }

    fn separator(&self, indent: &str, out: &mut String) {
        out.push(',');
        if self.pretty {
            out.push('\n');
            out.push_str(STEP);
            out.push_str(indent);
        }
    }

    fn close(&self, bracket: char, indent: &str, out: &mut String) {
        if self.pretty {
            out.push('\n');
            out.push_str(indent);
        }
        out.push(bracket);
    }
}

/// Backslash-escape double quotes; nothing else is escaped
pub fn escape_quotes(s: &str) -> String {
    s.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::NodeMap;
    use chrono::NaiveDate;

    fn render(node: &Node, pretty: bool) -> String {
        JsonWriter::new(&Config::default(), pretty).render(node)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(render(&Node::from("hi"), false), "\"hi\"");
        assert_eq!(render(&Node::from(42), false), "42");
        assert_eq!(render(&Node::from(-7), false), "-7");
        assert_eq!(render(&Node::from(2.5), false), "2.5");
        assert_eq!(render(&Node::from(true), false), "true");
        assert_eq!(render(&Node::Null, false), "null");
    }

    #[test]
    fn test_only_quotes_are_escaped() {
        let node = Node::from(r#"say "hi" \ back"#);
        assert_eq!(render(&node, false), r#""say \"hi\" \ back""#);
    }

    #[test]
    fn test_timestamps() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(render(&Node::from(date), false), "\"2021-01-02\"");

        let datetime = NaiveDate::from_ymd_opt(2021, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(render(&Node::from(datetime), false), "\"2021-01-02 03:04:05\"");
    }

    #[test]
    fn test_compact_containers() {
        let node: Node = vec![
            ("a", Node::from(1)),
            ("b", Node::from(vec![Node::from("x"), Node::Null])),
        ]
        .into_iter()
        .collect();
        assert_eq!(render(&node, false), r#"{"a":1,"b":["x",null]}"#);
    }

    #[test]
    fn test_pretty_containers() {
        let node: Node = vec![
            ("a", Node::from(1)),
            ("b", Node::from(vec![Node::from("x"), Node::from(2)])),
        ]
        .into_iter()
        .collect();
        let expected = "{\n  \"a\":1,\n  \"b\":[\n    \"x\",\n    2\n  ]\n}";
        assert_eq!(render(&node, true), expected);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(render(&Node::Map(NodeMap::new()), true), "{}");
        assert_eq!(render(&Node::Sequence(vec![]), true), "[]");
    }

    #[test]
    fn test_preferred_key_order() {
        let config = Config::default().with_key_order(["b", "a", "b", "zz"]);
        let node: Node = vec![("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let json = JsonWriter::new(&config, false).render(&node);
        assert_eq!(json, r#"{"b":2,"a":1,"c":3}"#);
    }

    #[test]
    fn test_keys_escape_quotes() {
        let node: Node = vec![("say \"x\"", 1)].into_iter().collect();
        assert_eq!(render(&node, false), r#"{"say \"x\"":1}"#);
    }
}
