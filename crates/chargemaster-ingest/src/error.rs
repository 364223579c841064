//! Error types for artifact ingestion.

use thiserror::Error;

/// Errors that can occur while decoding raw artifacts into rows.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The caller supplied no artifact under the requested identifier.
    #[error("no artifact supplied for {url}")]
    MissingArtifact { url: String },

    /// An artifact was supplied in the wrong shape for its parser.
    #[error("artifact {url} supplied as {actual}, parser expects {expected}")]
    WrongArtifactKind {
        url: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Failed to read bytes from the underlying stream.
    #[error("failed to read artifact stream: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text.
    #[error("malformed delimited row: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON document.
    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
