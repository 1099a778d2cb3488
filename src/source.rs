//! Document sources
//!
//! Defines the input collaborator contract: a pull-based sequence of
//! documents. The analyzer never queries, filters, or paginates a source;
//! it only asks for the next document, so a source may be backed by a
//! paginated cursor, a throttled stream, or an in-memory collection.

use async_trait::async_trait;

use crate::error::Result;
use crate::value::Document;

/// A source of documents for schema analysis
#[async_trait]
pub trait DocumentSource: Send {
    /// Produce the next document, or `None` when the sequence is exhausted.
    ///
    /// Errors propagate unchanged to the analysis caller; the analyzer never
    /// retries and never returns a partial schema after a source failure.
    async fn next_document(&mut self) -> Result<Option<Document>>;
}

/// An in-memory document source
#[derive(Debug, Default)]
pub struct MemorySource {
    docs: std::collections::VecDeque<Document>,
}

impl MemorySource {
    /// Create a source over an in-memory collection
    pub fn new(docs: impl IntoIterator<Item = Document>) -> Self {
        Self {
            docs: docs.into_iter().collect(),
        }
    }

    /// Remaining document count
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True when no documents remain
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn next_document(&mut self) -> Result<Option<Document>> {
        Ok(self.docs.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn doc(key: &str) -> Document {
        let mut doc = Document::new();
        doc.insert(key.to_string(), Value::Null);
        doc
    }

    #[tokio::test]
    async fn test_memory_source_yields_in_order() {
        let mut source = MemorySource::new(vec![doc("a"), doc("b")]);
        assert_eq!(source.len(), 2);

        let first = source.next_document().await.unwrap().unwrap();
        assert!(first.contains_key("a"));
        let second = source.next_document().await.unwrap().unwrap();
        assert!(second.contains_key("b"));
        assert!(source.next_document().await.unwrap().is_none());
        assert!(source.is_empty());
    }
}
