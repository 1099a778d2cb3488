//! Probabilistic schema engine
//!
//! Accumulates per-field type distributions over a document collection and
//! derives exact occurrence probabilities in a single finalize pass.
//!
//! # Overview
//!
//! - `SchemaAnalyzer` - drives one sequential pass over the input
//! - `Accumulator` - arena of per-field/per-type working counts (internal)
//! - `Schema` / `SchemaField` / `SchemaType` - the immutable output tree

mod accumulator;
mod analyzer;
mod types;

pub use analyzer::{analyze_documents, analyze_json_documents, SchemaAnalyzer};
pub use types::{Schema, SchemaField, SchemaType};
