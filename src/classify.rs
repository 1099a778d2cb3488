//! Type classification
//!
//! Maps an arbitrary [`Value`] to its canonical type tag plus type-specific
//! metadata. Classification is a total function: every value in the model
//! carries exactly one tag. The match arms follow a fixed priority order
//! (null, extended scalar wrappers, native scalars, sequences, keyed
//! structures) so structurally overlapping checks resolve deterministically.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Canonical type tag assigned to every observed value.
///
/// `Undefined` represents "field absent in this context" and is synthesized
/// by the finalize pass, never returned by [`classify`]. `Document` and
/// `Array` are composite tags carrying recursive sub-schemas in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Null,
    Undefined,
    Boolean,
    Number,
    String,
    Date,
    ObjectId,
    Document,
    Array,
    Binary,
    Decimal128,
    Double,
    Int32,
    Long,
    #[serde(rename = "BSONRegExp")]
    RegExp,
    Code,
    #[serde(rename = "BSONSymbol")]
    Symbol,
    Timestamp,
    MinKey,
    MaxKey,
}

impl TypeTag {
    /// The tag's canonical name as it appears in rendered schemas
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "Null",
            TypeTag::Undefined => "Undefined",
            TypeTag::Boolean => "Boolean",
            TypeTag::Number => "Number",
            TypeTag::String => "String",
            TypeTag::Date => "Date",
            TypeTag::ObjectId => "ObjectId",
            TypeTag::Document => "Document",
            TypeTag::Array => "Array",
            TypeTag::Binary => "Binary",
            TypeTag::Decimal128 => "Decimal128",
            TypeTag::Double => "Double",
            TypeTag::Int32 => "Int32",
            TypeTag::Long => "Long",
            TypeTag::RegExp => "BSONRegExp",
            TypeTag::Code => "Code",
            TypeTag::Symbol => "BSONSymbol",
            TypeTag::Timestamp => "Timestamp",
            TypeTag::MinKey => "MinKey",
            TypeTag::MaxKey => "MaxKey",
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of classifying a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Canonical tag
    pub tag: TypeTag,
    /// Declared binary subtype, present only for `Binary`-tagged values
    pub binary_subtype: Option<u8>,
}

impl Classification {
    fn tag(tag: TypeTag) -> Self {
        Self {
            tag,
            binary_subtype: None,
        }
    }

    fn binary(subtype: u8) -> Self {
        Self {
            tag: TypeTag::Binary,
            binary_subtype: Some(subtype),
        }
    }
}

/// UUIDs are binary values with this reserved subtype.
const BINARY_SUBTYPE_UUID: u8 = 4;

/// Classify a value into its canonical tag and metadata.
///
/// Never fails: the value model is closed, so every value matches exactly
/// one arm. A UUID wrapper classifies as `Binary` (subtype 4) rather than
/// introducing a tag of its own, and a `$ref`/`$id` convention object is not
/// special-cased; it is a plain `Document` like any other keyed structure.
pub fn classify(value: &Value) -> Classification {
    match value {
        Value::Null => Classification::tag(TypeTag::Null),
        Value::ObjectId(_) => Classification::tag(TypeTag::ObjectId),
        Value::Decimal128(_) => Classification::tag(TypeTag::Decimal128),
        Value::Double(_) => Classification::tag(TypeTag::Double),
        Value::Int32(_) => Classification::tag(TypeTag::Int32),
        Value::Long(_) => Classification::tag(TypeTag::Long),
        Value::Binary { subtype, .. } => Classification::binary(*subtype),
        Value::Uuid(_) => Classification::binary(BINARY_SUBTYPE_UUID),
        Value::RegExp { .. } => Classification::tag(TypeTag::RegExp),
        Value::Code { .. } => Classification::tag(TypeTag::Code),
        Value::Symbol(_) => Classification::tag(TypeTag::Symbol),
        Value::Timestamp { .. } => Classification::tag(TypeTag::Timestamp),
        Value::MinKey => Classification::tag(TypeTag::MinKey),
        Value::MaxKey => Classification::tag(TypeTag::MaxKey),
        Value::Boolean(_) => Classification::tag(TypeTag::Boolean),
        Value::Number(_) => Classification::tag(TypeTag::Number),
        Value::String(_) => Classification::tag(TypeTag::String),
        Value::Date(_) => Classification::tag(TypeTag::Date),
        Value::Array(_) => Classification::tag(TypeTag::Array),
        Value::Document(_) => Classification::tag(TypeTag::Document),
    }
}
