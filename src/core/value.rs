//! Core value types for the document tree
//!
//! Every node of a parsed JSON or YAML document is a [`Node`]. The set of
//! variants is closed; the resolver and both generators dispatch with an
//! exhaustive `match`.

use chrono::{NaiveDateTime, Timelike};
use indexmap::IndexMap;
use std::fmt;

/// Map node storage. Keys keep the order in which the parser produced them.
pub type NodeMap = IndexMap<String, Node>;

/// A single typed value in the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Map(NodeMap),
    Sequence(Vec<Node>),
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// A date or date-time; see [`is_date_only`]
    Timestamp(NaiveDateTime),
    Null,
}

/// The type discriminator reported by path lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    String,
    Float,
    Int,
    Bool,
    Time,
    Map,
    Array,
    Null,
}

impl NodeType {
    /// The type tag string used by the query API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Float => "float64",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Time => "time",
            Self::Map => "map",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    /// Parse a type tag back into a `NodeType`
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(Self::String),
            "float64" => Some(Self::Float),
            "int" => Some(Self::Int),
            "bool" => Some(Self::Bool),
            "time" => Some(Self::Time),
            "map" => Some(Self::Map),
            "array" => Some(Self::Array),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// The type discriminator of this node
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Map(_) => NodeType::Map,
            Self::Sequence(_) => NodeType::Array,
            Self::String(_) => NodeType::String,
            Self::Integer(_) => NodeType::Int,
            Self::Float(_) => NodeType::Float,
            Self::Boolean(_) => NodeType::Bool,
            Self::Timestamp(_) => NodeType::Time,
            Self::Null => NodeType::Null,
        }
    }

    /// Check if this node is a map or a sequence
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Map(_) | Self::Sequence(_))
    }

    /// Check if this node is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Number of direct children: keys of a map, elements of a sequence,
    /// zero for scalars
    pub fn descendant_count(&self) -> usize {
        match self {
            Self::Map(map) => map.len(),
            Self::Sequence(items) => items.len(),
            _ => 0,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Strictly a float; integers are not widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Either numeric variant, widened to `f64`
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// A timestamp is a plain date when its time of day is exactly midnight
pub fn is_date_only(timestamp: &NaiveDateTime) -> bool {
    timestamp.hour() == 0
        && timestamp.minute() == 0
        && timestamp.second() == 0
        && timestamp.nanosecond() == 0
}

/// Text form shared by both generators, without quotes
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    if is_date_only(timestamp) {
        timestamp.format("%Y-%m-%d").to_string()
    } else {
        timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDateTime> for Node {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Self::Sequence(value)
    }
}

impl From<NodeMap> for Node {
    fn from(value: NodeMap) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_node_types() {
        assert_eq!(Node::from("x").node_type(), NodeType::String);
        assert_eq!(Node::from(1).node_type(), NodeType::Int);
        assert_eq!(Node::from(1.5).node_type(), NodeType::Float);
        assert_eq!(Node::from(true).node_type(), NodeType::Bool);
        assert_eq!(Node::Null.node_type(), NodeType::Null);
        assert_eq!(Node::Sequence(vec![]).node_type(), NodeType::Array);
        assert_eq!(Node::Map(NodeMap::new()).node_type(), NodeType::Map);
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(NodeType::Float.as_str(), "float64");
        assert_eq!(NodeType::Array.to_string(), "array");
        assert_eq!(NodeType::from_tag("time"), Some(NodeType::Time));
        assert_eq!(NodeType::from_tag("none"), None);
    }

    #[test]
    fn test_strict_accessors() {
        let int = Node::from(30);
        assert_eq!(int.as_i64(), Some(30));
        assert_eq!(int.as_f64(), None);
        assert_eq!(int.as_number(), Some(30.0));

        let float = Node::from(2.5);
        assert_eq!(float.as_i64(), None);
        assert_eq!(float.as_number(), Some(2.5));
    }

    #[test]
    fn test_descendant_count() {
        let map: Node = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(map.descendant_count(), 2);
        assert!(map.is_container());

        let seq = Node::from(vec![Node::from("x")]);
        assert_eq!(seq.descendant_count(), 1);
        assert_eq!(Node::from("scalar").descendant_count(), 0);
    }

    #[test]
    fn test_timestamp_formatting() {
        let date = NaiveDate::from_ymd_opt(2022, 3, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(is_date_only(&date));
        assert_eq!(format_timestamp(&date), "2022-03-14");

        let datetime = NaiveDate::from_ymd_opt(2022, 3, 14)
            .unwrap()
            .and_hms_opt(15, 9, 26)
            .unwrap();
        assert_eq!(format_timestamp(&datetime), "2022-03-14 15:09:26");

        let sub_second = NaiveDate::from_ymd_opt(2022, 3, 14)
            .unwrap()
            .and_hms_nano_opt(0, 0, 0, 5)
            .unwrap();
        assert!(!is_date_only(&sub_second));
        assert_eq!(format_timestamp(&sub_second), "2022-03-14 00:00:00");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Node::from(None::<i64>), Node::Null);
        assert_eq!(Node::from(Some("v")), Node::from("v"));
    }
}
