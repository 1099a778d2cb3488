//! Schema output model
//!
//! The immutable value tree returned by analysis. Counts are exact; every
//! probability is derived once, during the finalize pass, as
//! `count / total contexts` at that tree level.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::TypeTag;

/// One observed type for a field
///
/// `Document`-tagged types carry `fields`: the recursively merged schema of
/// the nested documents contributing to this type's count, with probabilities
/// relative to that count. `Array`-tagged types carry `types`: the flattened
/// element-type distribution, with probabilities relative to the total
/// element slots across all contributing arrays. `Binary`-tagged types carry
/// a subtype histogram as descriptive data without probability semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaType {
    /// Canonical type tag
    pub name: TypeTag,

    /// Full dotted path of the owning field (addressing only)
    pub path: String,

    /// Occurrences of this tag across all parent contexts
    pub count: u64,

    /// `count / total parent contexts`; all of a field's type probabilities
    /// sum to 1.0 once the implicit `Undefined` share is included
    pub probability: f64,

    /// Nested field schema (Document types only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<SchemaField>>,

    /// Flattened element-type distribution (Array types only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<SchemaType>>,

    /// Declared subtype histogram (Binary types only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_subtypes: Option<BTreeMap<u8, u64>>,
}

impl SchemaType {
    /// Nested fields of a Document-tagged type
    pub fn fields(&self) -> &[SchemaField] {
        self.fields.as_deref().unwrap_or(&[])
    }

    /// Element types of an Array-tagged type
    pub fn element_types(&self) -> &[SchemaType] {
        self.types.as_deref().unwrap_or(&[])
    }

    /// Look up a nested field by name (Document types)
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Look up an element type by tag (Array types)
    pub fn element_type(&self, tag: TypeTag) -> Option<&SchemaType> {
        self.element_types().iter().find(|t| t.name == tag)
    }
}

/// One field path within a parent context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Key within the immediate parent
    pub name: String,

    /// Full dotted path from the analyzed root (addressing only; merge
    /// identity is positional, by name, within a parent context)
    pub path: String,

    /// Parent-context occurrences where this field held any defined value,
    /// explicit null included
    pub count: u64,

    /// `count / total parent contexts`, which equals one minus the
    /// `Undefined` probability
    pub probability: f64,

    /// Distinct observed types, unique by tag, in first-seen order; the
    /// implicit `Undefined` entry, when present, comes last
    pub types: Vec<SchemaType>,
}

impl SchemaField {
    /// Look up a type by tag
    pub fn type_named(&self, tag: TypeTag) -> Option<&SchemaType> {
        self.types.iter().find(|t| t.name == tag)
    }

    /// Whether this field was ever observed with the given tag
    pub fn has_type(&self, tag: TypeTag) -> bool {
        self.type_named(tag).is_some()
    }

    /// Probability of the field being absent (0.0 without an Undefined type)
    pub fn undefined_probability(&self) -> f64 {
        self.type_named(TypeTag::Undefined)
            .map_or(0.0, |t| t.probability)
    }
}

/// The root schema for an analyzed document collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Total top-level documents processed
    pub count: u64,

    /// Top-level field schema, in first-seen order
    pub fields: Vec<SchemaField>,
}

impl Schema {
    /// Look up a top-level field by name
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Convert to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Convert to a pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
