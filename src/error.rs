//! Error types for docshape
//!
//! This module defines the error hierarchy for the whole crate.
//! All fallible public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for docshape
#[derive(Error, Debug)]
pub enum Error {
    /// A value could not be assigned any canonical type tag.
    ///
    /// Fatal: the analysis aborts and no partial schema is returned. The
    /// path points at the offending value within the analyzed document.
    #[error("cannot classify value at '{path}': {message}")]
    Classification { path: String, message: String },

    /// The document source failed while producing the next document.
    ///
    /// Recovery policy belongs to the caller; the analyzer never retries.
    #[error("document source failed: {message}")]
    Source { message: String },

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create a classification error for the given field path
    pub fn classification(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Classification {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a source error
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }
}

/// Result type alias for docshape
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_display() {
        let err = Error::classification("address.valid", "unsupported value");
        assert_eq!(
            err.to_string(),
            "cannot classify value at 'address.valid': unsupported value"
        );
    }

    #[test]
    fn test_source_display() {
        let err = Error::source("cursor exhausted unexpectedly");
        assert_eq!(
            err.to_string(),
            "document source failed: cursor exhausted unexpectedly"
        );
    }

    #[test]
    fn test_json_parse_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(err.to_string().starts_with("failed to parse JSON"));
    }
}
