//! Schema analyzer
//!
//! Orchestrates a single sequential pass over a document collection, merging
//! each document into the accumulator as it arrives and deriving
//! probabilities once at the end. The only suspension point is awaiting the
//! next document, so a source can be a paginated cursor or a throttled
//! stream; the merge itself is synchronous and CPU-bound.

use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use super::accumulator::Accumulator;
use super::types::Schema;
use crate::error::Result;
use crate::source::DocumentSource;
use crate::value::{document_from_json, Document};

/// Schema analyzer with configuration options
#[derive(Debug)]
pub struct SchemaAnalyzer {
    acc: Accumulator,
    sample_size: Option<u64>,
}

impl Default for SchemaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaAnalyzer {
    /// Create a new analyzer with default settings
    pub fn new() -> Self {
        Self {
            acc: Accumulator::new(None),
            sample_size: None,
        }
    }

    /// Stop pulling from the input after this many documents.
    ///
    /// The schema produced is still consistent: every denominator reflects
    /// the documents actually processed.
    #[must_use]
    pub fn with_sample_size(mut self, documents: usize) -> Self {
        self.sample_size = Some(documents as u64);
        self
    }

    /// Only merge the first `elements` of each array.
    ///
    /// Unbounded by default; element-type probabilities then describe the
    /// sampled prefix. Configure before the first `analyze` call: this
    /// replaces the accumulator.
    #[must_use]
    pub fn with_max_array_elements(mut self, elements: usize) -> Self {
        self.acc = Accumulator::new(Some(elements));
        self
    }

    /// Top-level documents merged so far
    pub fn document_count(&self) -> u64 {
        self.acc.document_count()
    }

    /// Merge one document's contribution
    pub fn analyze(&mut self, doc: &Document) {
        self.acc.merge_document(doc);
        trace!(
            documents = self.acc.document_count(),
            fields = self.acc.field_count(),
            "merged document"
        );
    }

    /// Merge one plain JSON document.
    ///
    /// Fails with a classification error when the root is not an object;
    /// the root context is always a document.
    pub fn analyze_json(&mut self, value: &serde_json::Value) -> Result<()> {
        let doc = document_from_json(value)?;
        self.analyze(&doc);
        Ok(())
    }

    /// Consume a stream of documents and produce the schema.
    ///
    /// Error items propagate unchanged and abort the run; no partial schema
    /// is returned.
    pub async fn run<S>(mut self, stream: S) -> Result<Schema>
    where
        S: Stream<Item = Result<Document>>,
    {
        futures::pin_mut!(stream);
        while !self.sample_reached() {
            let Some(doc) = stream.next().await.transpose()? else {
                break;
            };
            self.analyze(&doc);
        }
        Ok(self.finish())
    }

    /// Drain a pull-based document source and produce the schema
    pub async fn run_source<S>(mut self, source: &mut S) -> Result<Schema>
    where
        S: DocumentSource,
    {
        while !self.sample_reached() {
            let Some(doc) = source.next_document().await? else {
                break;
            };
            self.analyze(&doc);
        }
        Ok(self.finish())
    }

    /// Finalize: convert counts to probabilities and return the immutable tree
    pub fn finish(self) -> Schema {
        debug!(
            documents = self.acc.document_count(),
            fields = self.acc.field_count(),
            "finalizing schema"
        );
        self.acc.finalize()
    }

    fn sample_reached(&self) -> bool {
        self.sample_size
            .is_some_and(|cap| self.acc.document_count() >= cap)
    }
}

/// Analyze an in-memory document collection (convenience function)
pub fn analyze_documents<'a, I>(docs: I) -> Schema
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut analyzer = SchemaAnalyzer::new();
    for doc in docs {
        analyzer.analyze(doc);
    }
    analyzer.finish()
}

/// Analyze a collection of plain JSON documents (convenience function)
pub fn analyze_json_documents<'a, I>(docs: I) -> Result<Schema>
where
    I: IntoIterator<Item = &'a serde_json::Value>,
{
    let mut analyzer = SchemaAnalyzer::new();
    for doc in docs {
        analyzer.analyze_json(doc)?;
    }
    Ok(analyzer.finish())
}
