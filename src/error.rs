//! Error types for cvpress.
//!
//! Parsing, grouping, theming and composing are total: they degrade to empty
//! or plain output instead of failing. The only fallible stage is export, so
//! every variant here describes a way the final blob could not be produced.

use std::io;
use thiserror::Error;

/// Result type alias for cvpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while exporting a composed document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing the encoded document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The PDF object graph could not be assembled or serialized.
    #[error("PDF encoding error: {0}")]
    Pdf(String),

    /// The page tree could not be serialized as JSON.
    #[error("JSON serialization error: {0}")]
    Json(String),

    /// A content stream could not be compressed.
    #[error("Compression error: {0}")]
    Compression(String),

    /// There were no pages to export.
    #[error("Document has no pages to export")]
    EmptyDocument,
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyDocument;
        assert_eq!(err.to_string(), "Document has no pages to export");

        let err = Error::Pdf("bad xref".to_string());
        assert_eq!(err.to_string(), "PDF encoding error: bad xref");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
