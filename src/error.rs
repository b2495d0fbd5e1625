//! Error types for the dvstring mapper.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`DvStringError`] enum. Configuration problems surface while a mapping is
//! parsed or built; analysis problems surface per document.
//!
//! # Examples
//!
//! ```
//! use dvstring::error::{DvStringError, Result};
//!
//! fn check_gap(gap: i64) -> Result<()> {
//!     if gap < 0 {
//!         return Err(DvStringError::mapper_parsing(
//!             "name",
//!             "position_offset_gap",
//!             "must not be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_gap(-1).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for dvstring operations.
#[derive(Error, Debug)]
pub enum DvStringError {
    /// I/O errors raised while reading analyzer input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis errors (tokenization, filtering, analyzer construction).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A token stream was driven out of its reset/increment/end order.
    #[error("Token stream error: {0}")]
    TokenStream(String),

    /// A mapping option could not be parsed or validated.
    #[error("Failed to parse mapping for field [{field}], option [{option}]: {reason}")]
    MapperParsing {
        /// Name of the field being mapped.
        field: String,
        /// The offending option.
        option: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A mapping referenced an analyzer the registry does not know.
    #[error("Analyzer [{analyzer}] not found for field [{field}]")]
    AnalyzerNotFound {
        /// The analyzer name that was looked up.
        analyzer: String,
        /// Name of the field being mapped.
        field: String,
    },

    /// A document source did not match its mapping.
    #[error("Document error: {0}")]
    Document(String),

    /// In-memory index errors.
    #[error("Index error: {0}")]
    Index(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with [`DvStringError`].
pub type Result<T> = std::result::Result<T, DvStringError>;

impl DvStringError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        DvStringError::Analysis(msg.into())
    }

    /// Create a new token stream state error.
    pub fn token_stream<S: Into<String>>(msg: S) -> Self {
        DvStringError::TokenStream(msg.into())
    }

    /// Create a new mapping error naming the field and the offending option.
    pub fn mapper_parsing<F, O, R>(field: F, option: O, reason: R) -> Self
    where
        F: Into<String>,
        O: Into<String>,
        R: Into<String>,
    {
        DvStringError::MapperParsing {
            field: field.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Create a new analyzer-not-found error.
    pub fn analyzer_not_found<A: Into<String>, F: Into<String>>(analyzer: A, field: F) -> Self {
        DvStringError::AnalyzerNotFound {
            analyzer: analyzer.into(),
            field: field.into(),
        }
    }

    /// Create a new document error.
    pub fn document<S: Into<String>>(msg: S) -> Self {
        DvStringError::Document(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        DvStringError::Index(msg.into())
    }

    /// Returns true for errors raised while a mapping is parsed or built.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DvStringError::MapperParsing { .. } | DvStringError::AnalyzerNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = DvStringError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = DvStringError::mapper_parsing("title", "ignore_above", "expected an integer");
        assert_eq!(
            error.to_string(),
            "Failed to parse mapping for field [title], option [ignore_above]: expected an integer"
        );
        assert!(error.is_configuration_error());

        let error = DvStringError::analyzer_not_found("missing", "title");
        assert_eq!(
            error.to_string(),
            "Analyzer [missing] not found for field [title]"
        );
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::UnexpectedEof, "buffer exhausted");
        let error = DvStringError::from(io_error);

        match error {
            DvStringError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
        assert!(!DvStringError::analysis("x").is_configuration_error());
    }
}
