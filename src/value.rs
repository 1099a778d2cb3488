//! Document value model
//!
//! A closed tagged union covering the extended scalar type system of
//! BSON-flavoured documents. The analyzer operates only on this model and
//! never reflects on a driver's own wrapper classes; callers convert their
//! values into [`Value`] (plain JSON converts via [`From`]).

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::error::{Error, Result};

/// An ordered keyed structure. Key order is preserved because field and
/// type insertion order in the output schema is first-seen order.
pub type Document = IndexMap<String, Value>;

/// Any value representable in the document model
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null (distinct from a field being absent)
    Null,
    Boolean(bool),
    /// Native numeric primitive (all plain JSON numbers land here)
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    /// 24-character hex object identifier
    ObjectId(String),
    Document(Document),
    Array(Vec<Value>),
    /// Binary data with its declared subtype (0-255)
    Binary { subtype: u8, bytes: Vec<u8> },
    /// UUID wrapper; classified as `Binary` with the reserved subtype 4
    Uuid(Uuid),
    /// Decimal128 in its string representation
    Decimal128(String),
    Double(f64),
    Int32(i32),
    Long(i64),
    RegExp {
        pattern: String,
        options: String,
    },
    Code {
        code: String,
        scope: Option<Document>,
    },
    Symbol(String),
    Timestamp {
        time: u32,
        increment: u32,
    },
    MinKey,
    MaxKey,
}

impl Value {
    /// Shorthand for a document value
    pub fn document(doc: Document) -> Self {
        Self::Document(doc)
    }

    /// Shorthand for generic (subtype 0) binary data
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Binary {
            subtype: 0,
            bytes: bytes.into(),
        }
    }

    /// True for keyed-structure values
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document(_))
    }

    /// True for sequence values
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            // Plain JSON carries no numeric subkind; everything is Number.
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Document(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::from(&value)
    }
}

/// Convert a JSON value into a root [`Document`].
///
/// The root context is always a document, so anything but a JSON object is
/// rejected with a classification error.
pub fn document_from_json(value: &serde_json::Value) -> Result<Document> {
    match Value::from(value) {
        Value::Document(doc) => Ok(doc),
        other => Err(Error::classification(
            "(root)",
            format!("root value must be a document, got {other:?}"),
        )),
    }
}

/// Parse a JSON string into a root [`Document`]
pub fn document_from_json_str(json: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    document_from_json(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_conversion_preserves_key_order() {
        let doc = document_from_json(&json!({"z": 1, "a": 2, "m": 3})).unwrap();
        let keys: Vec<_> = doc.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_json_numbers_are_native_numbers() {
        let doc = document_from_json(&json!({"i": 1, "f": 1.5})).unwrap();
        assert_eq!(doc["i"], Value::Number(1.0));
        assert_eq!(doc["f"], Value::Number(1.5));
    }

    #[test]
    fn test_nested_json_conversion() {
        let doc = document_from_json(&json!({
            "user": {"name": "Ada", "tags": ["a", null]}
        }))
        .unwrap();

        let Value::Document(user) = &doc["user"] else {
            panic!("expected document");
        };
        assert_eq!(user["name"], Value::String("Ada".to_string()));
        assert_eq!(
            user["tags"],
            Value::Array(vec![Value::String("a".to_string()), Value::Null])
        );
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        let err = document_from_json(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::Classification { .. }));
        assert!(err.to_string().contains("(root)"));
    }

    #[test]
    fn test_document_from_json_str() {
        let doc = document_from_json_str(r#"{"a": true}"#).unwrap();
        assert_eq!(doc["a"], Value::Boolean(true));
    }
}
