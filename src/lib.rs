//! # docshape
//!
//! Probabilistic schema analysis for collections of BSON-flavoured documents.
//!
//! Given N input documents, docshape reports, for every field path reachable
//! in any document, the set of distinct value types observed at that path,
//! the fraction of contexts in which each type occurred, and a recursively
//! computed sub-schema for document- and array-typed fields.
//!
//! ## Features
//!
//! - **Extended type taxonomy**: the full BSON-style scalar set (ObjectId,
//!   Decimal128, Int32, Long, Binary, Timestamp, ...) next to plain JSON types
//! - **Exact probabilities**: per-field type probabilities always sum to 1.0,
//!   with absence modeled as a first-class `Undefined` type
//! - **Recursive sub-schemas**: nested documents and flattened array element
//!   distributions, each with its own probability denominator
//! - **Streaming accumulation**: memory bounded by schema cardinality, not
//!   document count; async sources and sampling caps supported
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docshape::{analyze_json_documents, TypeTag};
//! use serde_json::json;
//!
//! let docs = vec![
//!     json!({ "name": "Ada", "age": 36 }),
//!     json!({ "name": "Alan" }),
//! ];
//!
//! let schema = analyze_json_documents(&docs)?;
//! let age = schema.field("age").unwrap();
//! assert_eq!(age.probability, 0.5);
//! assert!(age.has_type(TypeTag::Undefined));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! documents ──> SchemaAnalyzer ──> Accumulator (arena of field/type nodes)
//!                    │                       │
//!                    └── finish() ───────────┴──> Schema (immutable tree)
//! ```
//!
//! Acquisition of the collection (cursors, file loaders) and rendering of the
//! output belong to the caller; the crate only consumes a sequence of
//! documents and returns the `Schema` value tree.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(missing_docs)] // TODO: finish field-level docs before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Document value model
pub mod value;

/// Type classification
pub mod classify;

/// Document source collaborators
pub mod source;

/// Schema accumulation and analysis
pub mod schema;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::{classify, Classification, TypeTag};
pub use error::{Error, Result};
pub use schema::{analyze_documents, analyze_json_documents, Schema, SchemaAnalyzer, SchemaField, SchemaType};
pub use source::{DocumentSource, MemorySource};
pub use value::{document_from_json, document_from_json_str, Document, Value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
