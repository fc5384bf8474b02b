//! Parsing JSON and YAML text into documents
//!
//! `serde_json` and `serde_yaml` do the parsing; this module converts their
//! value trees into [`Node`] trees and tags the resulting [`Document`] with
//! its source format. Map order follows the source text.

use crate::core::config::SourceFormat;
use crate::core::value::{Node, NodeMap};
use crate::core::Document;
use crate::error::{DocPathError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;

const TIMESTAMP_TAG: &str = "timestamp";
const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Parse JSON text into a document
pub fn parse_json(text: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let root = json_to_node(&value);
    debug!("parsed JSON document with a {} root", root.node_type());
    Ok(Document::new(root, SourceFormat::Json))
}

/// Parse YAML text into a document; empty input yields a null root
pub fn parse_yaml(text: &str) -> Result<Document> {
    let root = if text.trim().is_empty() {
        Node::Null
    } else {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        yaml_to_node(value)?
    };
    debug!("parsed YAML document with a {} root", root.node_type());
    Ok(Document::new(root, SourceFormat::Yaml))
}

/// Convert a `serde_json` value; integers that fit `i64` stay integers
pub fn json_to_node(value: &serde_json::Value) -> Node {
    match value {
        serde_json::Value::Null => Node::Null,
        serde_json::Value::Bool(b) => Node::Boolean(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Node::Integer(i),
            None => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Node::String(s.clone()),
        serde_json::Value::Array(items) => Node::Sequence(items.iter().map(json_to_node).collect()),
        serde_json::Value::Object(map) => Node::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_node(v)))
                .collect(),
        ),
    }
}

/// Convert a `serde_yaml` value
///
/// Scalar map keys are stringified. Values tagged `!timestamp` become
/// timestamps when their text parses; any other tag is dropped.
pub fn yaml_to_node(value: serde_yaml::Value) -> Result<Node> {
    Ok(match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Boolean(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Node::Integer(i),
            None => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_yaml::Value::String(s) => Node::String(s),
        serde_yaml::Value::Sequence(items) => Node::Sequence(
            items
                .into_iter()
                .map(yaml_to_node)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = NodeMap::with_capacity(mapping.len());
            for (k, v) in mapping {
                map.insert(yaml_key(k)?, yaml_to_node(v)?);
            }
            Node::Map(map)
        }
        serde_yaml::Value::Tagged(tagged) => {
            let tagged = *tagged;
            let tag = tagged.tag.to_string();
            let name = tag.trim_start_matches('!');
            let name = name.strip_prefix(CORE_TAG_PREFIX).unwrap_or(name);
            let is_timestamp = name == TIMESTAMP_TAG;
            match tagged.value {
                serde_yaml::Value::String(text) if is_timestamp => match parse_timestamp(&text) {
                    Some(timestamp) => Node::Timestamp(timestamp),
                    None => Node::String(text),
                },
                inner => yaml_to_node(inner)?,
            }
        }
    })
}

impl From<&serde_json::Value> for Node {
    fn from(value: &serde_json::Value) -> Self {
        json_to_node(value)
    }
}

impl TryFrom<serde_yaml::Value> for Node {
    type Error = DocPathError;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        yaml_to_node(value)
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(DocPathError::unsupported_key(format!("{:?}", other))),
    }
}

/// Parse a date, a date-time (space or `T` separated, optional fraction) or
/// an RFC 3339 timestamp; offsets are converted to UTC
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime);
        }
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|datetime| datetime.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_json_number_typing() {
        let doc = parse_json(r#"{"int": 30, "float": 30.5, "whole": 2.0, "big": 1e300}"#).unwrap();
        let map = doc.root().as_map().unwrap();
        assert_eq!(map["int"], Node::Integer(30));
        assert_eq!(map["float"], Node::Float(30.5));
        assert_eq!(map["whole"], Node::Float(2.0));
        assert_eq!(map["big"], Node::Float(1e300));
        assert_eq!(doc.source_format(), SourceFormat::Json);
    }

    #[test]
    fn test_json_keeps_key_order() {
        let doc = parse_json(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&String> = doc.root().as_map().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_json("{\"a\": "), Err(DocPathError::Json(_))));
    }

    #[test]
    fn test_yaml_scalars() {
        let doc = parse_yaml("s: text\ni: 7\nf: 1.25\nb: true\nn: ~\nq: \"123\"\n").unwrap();
        let map = doc.root().as_map().unwrap();
        assert_eq!(map["s"], Node::from("text"));
        assert_eq!(map["i"], Node::Integer(7));
        assert_eq!(map["f"], Node::Float(1.25));
        assert_eq!(map["b"], Node::Boolean(true));
        assert_eq!(map["n"], Node::Null);
        assert_eq!(map["q"], Node::from("123"));
        assert_eq!(doc.source_format(), SourceFormat::Yaml);
    }

    #[test]
    fn test_yaml_non_string_keys() {
        let doc = parse_yaml("1: one\ntrue: yes\n").unwrap();
        let map = doc.root().as_map().unwrap();
        assert_eq!(map["1"], Node::from("one"));
        assert!(map.contains_key("true"));
    }

    #[test]
    fn test_yaml_complex_key_rejected() {
        let err = parse_yaml("? [a, b]\n: value\n").unwrap_err();
        assert!(matches!(err, DocPathError::UnsupportedKey { .. }));
    }

    #[test]
    fn test_yaml_timestamp_tag() {
        let doc = parse_yaml("day: !timestamp 2021-03-04\nplain: 2021-03-04\n").unwrap();
        let map = doc.root().as_map().unwrap();
        let day = map["day"].as_timestamp().unwrap();
        assert_eq!(day.date(), NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
        assert_eq!(map["plain"], Node::from("2021-03-04"));
    }

    #[test]
    fn test_other_tags_unwrap() {
        let doc = parse_yaml("v: !custom text\n").unwrap();
        assert_eq!(doc.root().as_map().unwrap()["v"], Node::from("text"));
    }

    #[test]
    fn test_value_conversions() {
        let json: serde_json::Value = serde_json::from_str(r#"[1, "a"]"#).unwrap();
        assert_eq!(
            Node::from(&json),
            Node::from(vec![Node::from(1), Node::from("a")])
        );

        let yaml: serde_yaml::Value = serde_yaml::from_str("k: true").unwrap();
        let node = Node::try_from(yaml).unwrap();
        assert_eq!(node.as_map().unwrap()["k"], Node::Boolean(true));
    }

    #[test]
    fn test_empty_yaml() {
        let doc = parse_yaml("  \n").unwrap();
        assert!(doc.root().is_null());
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let datetime = parse_timestamp("2021-03-04 05:06:07").unwrap();
        assert_eq!(datetime.hour(), 5);
        assert_eq!(datetime.second(), 7);

        let with_t = parse_timestamp("2021-03-04T05:06:07.5").unwrap();
        assert_eq!(with_t.nanosecond(), 500_000_000);

        let offset = parse_timestamp("2021-03-04T05:06:07+02:00").unwrap();
        assert_eq!(offset.hour(), 3);

        assert!(parse_timestamp("not a date").is_none());
    }
}
