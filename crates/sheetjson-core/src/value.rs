use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::ser::{Serialize, Serializer};

/// Named fields in column order.
pub type Record = IndexMap<String, Value>;

/// Keyed entries in insertion order.
pub type Table = IndexMap<Key, Value>;

/// Decoded cell or structure.
///
/// Containers never hold absent values: a field or element that decodes to
/// nothing is left out rather than stored as [`Value::Null`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<Value>),
    Record(Record),
    Table(Table),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Text(v) => serializer.serialize_str(v),
            Value::Sequence(items) => serializer.collect_seq(items),
            Value::Record(record) => serializer.collect_map(record),
            Value::Table(table) => serializer.collect_map(table),
        }
    }
}

/// Scalar usable as a map / object-document key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Text(String),
}

impl Key {
    /// Key for a decoded scalar; `None` for null and containers.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(Key::Bool(v)),
            Value::Int(v) => Some(Key::Int(v)),
            Value::Float(v) => Some(Key::Float(OrderedFloat(v))),
            Value::Text(v) => Some(Key::Text(v)),
            Value::Null | Value::Sequence(_) | Value::Record(_) | Value::Table(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(v) => write!(f, "{v}"),
            Key::Int(v) => write!(f, "{v}"),
            Key::Float(v) => write!(f, "{}", v.0),
            Key::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

/// Keys always serialize as strings so they are valid JSON object keys.
impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Top-level result of decoding one sheet.
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    /// One record per data row, in row order.
    Array(Vec<Record>),
    /// Records keyed by the value of column 2.
    Object(IndexMap<Key, Record>),
}

impl Document {
    pub fn len(&self) -> usize {
        match self {
            Document::Array(records) => records.len(),
            Document::Object(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Array(records) => serializer.collect_seq(records),
            Document::Object(table) => serializer.collect_map(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_matches_json_key_text() {
        assert_eq!(Key::Bool(true).to_string(), "true");
        assert_eq!(Key::Int(-7).to_string(), "-7");
        assert_eq!(Key::Float(OrderedFloat(1.5)).to_string(), "1.5");
        assert_eq!(Key::Text("red".into()).to_string(), "red");
    }

    #[test]
    fn document_len_counts_top_level_entries() {
        let mut record = Record::new();
        record.insert("id".to_string(), Value::Int(1));
        assert_eq!(Document::Array(vec![record.clone(), record.clone()]).len(), 2);

        let empty = Document::Object(IndexMap::new());
        assert!(empty.is_empty());
        assert_eq!(serde_json::to_string(&empty).expect("json"), "{}");

        let mut table = IndexMap::new();
        table.insert(Key::Bool(true), record);
        let keyed = Document::Object(table);
        assert_eq!(keyed.len(), 1);
        assert_eq!(serde_json::to_string(&keyed).expect("json"), r#"{"true":{"id":1}}"#);
    }

    #[test]
    fn containers_are_not_keys() {
        assert_eq!(Key::from_value(Value::Null), None);
        assert_eq!(Key::from_value(Value::Sequence(vec![])), None);
        assert_eq!(Key::from_value(Value::Int(3)), Some(Key::Int(3)));
    }
}
