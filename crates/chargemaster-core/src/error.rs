//! Error types for the normalization core.

use chargemaster_ingest::IngestError;
use thiserror::Error;

/// Errors that can occur while normalizing chargemaster artifacts.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Registry lookup miss: names the attempted value and every known
    /// institution so callers can self-correct.
    #[error("no registered institution matched '{name}'; choices are: {known}")]
    UnknownInstitution { name: String, known: String },

    /// Two parsers registered under the same institution name. This is a
    /// configuration error and is detected when the registry is built.
    #[error("institution '{name}' registered more than once")]
    DuplicateInstitution { name: String },

    /// A price-like value that is neither numeric nor a recognized missing
    /// sentinel.
    #[error("unparsable price value '{value}'")]
    Price { value: String },

    /// A row matched header discovery but lacks a structural column the
    /// institution requires.
    #[error("row is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// The artifact itself could not be decoded into rows or a document.
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, ParseError>;
