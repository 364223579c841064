//! Artifact sets: the caller-supplied mapping from source identifier to raw
//! input.
//!
//! The core performs no network I/O. Callers fetch each institution's
//! published artifacts themselves and hand the open inputs over here, keyed
//! by the canonical source URL. Byte-shaped sources (delimited text, JSON)
//! arrive as streams; spreadsheet sources arrive already decoded to rows of
//! scalar [`Cell`] values, since workbook decoding is a collaborator concern.
//!
//! Inputs are consumed strictly forward, once: a parser takes ownership of
//! each artifact it needs and the set cannot be reused afterwards.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use crate::cell::Cell;
use crate::error::{IngestError, Result};

/// Lazily produced rows of scalar cells (pre-decoded spreadsheet content).
pub type CellRowIter = Box<dyn Iterator<Item = Vec<Cell>>>;

/// One raw input for a single artifact identifier.
pub enum Artifact {
    /// Raw byte stream: delimited text or a JSON document.
    Stream(Box<dyn Read>),
    /// Pre-decoded worksheet rows.
    Rows(CellRowIter),
}

impl Artifact {
    fn kind(&self) -> &'static str {
        match self {
            Artifact::Stream(_) => "byte stream",
            Artifact::Rows(_) => "decoded rows",
        }
    }
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Mapping from artifact identifier (typically the source URL) to its input.
#[derive(Debug, Default)]
pub struct ArtifactSet {
    artifacts: HashMap<String, Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an open byte stream under an identifier.
    pub fn insert_stream(&mut self, url: impl Into<String>, stream: impl Read + 'static) {
        self.artifacts
            .insert(url.into(), Artifact::Stream(Box::new(stream)));
    }

    /// Registers pre-decoded worksheet rows under an identifier.
    pub fn insert_rows(&mut self, url: impl Into<String>, rows: Vec<Vec<Cell>>) {
        self.insert_row_iter(url, rows.into_iter());
    }

    /// Registers a lazy row source under an identifier.
    pub fn insert_row_iter(
        &mut self,
        url: impl Into<String>,
        rows: impl Iterator<Item = Vec<Cell>> + 'static,
    ) {
        self.artifacts
            .insert(url.into(), Artifact::Rows(Box::new(rows)));
    }

    /// Removes and returns the byte stream registered under `url`.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is unknown or the artifact was supplied as
    /// decoded rows.
    pub fn take_stream(&mut self, url: &str) -> Result<Box<dyn Read>> {
        match self.take(url)? {
            Artifact::Stream(stream) => Ok(stream),
            other @ Artifact::Rows(_) => Err(IngestError::WrongArtifactKind {
                url: url.to_string(),
                expected: "byte stream",
                actual: other.kind(),
            }),
        }
    }

    /// Removes and returns the decoded rows registered under `url`.
    ///
    /// # Errors
    ///
    /// Fails when the identifier is unknown or the artifact was supplied as
    /// a byte stream.
    pub fn take_rows(&mut self, url: &str) -> Result<CellRowIter> {
        match self.take(url)? {
            Artifact::Rows(rows) => Ok(rows),
            other @ Artifact::Stream(_) => Err(IngestError::WrongArtifactKind {
                url: url.to_string(),
                expected: "decoded rows",
                actual: other.kind(),
            }),
        }
    }

    fn take(&mut self, url: &str) -> Result<Artifact> {
        self.artifacts
            .remove(url)
            .ok_or_else(|| IngestError::MissingArtifact {
                url: url.to_string(),
            })
    }

    pub fn contains(&self, url: &str) -> bool {
        self.artifacts.contains_key(url)
    }

    /// Identifiers currently registered, in arbitrary order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.artifacts.keys().map(String::as_str)
    }
}
