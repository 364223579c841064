pub mod artifact;
pub mod cell;
pub mod error;
pub mod header;
pub mod json;
pub mod rows;

pub use artifact::{Artifact, ArtifactSet, CellRowIter};
pub use cell::Cell;
pub use error::{IngestError, Result};
pub use header::{
    DEFAULT_HEADER_THRESHOLD, HeaderColumn, HeaderMap, HeaderSpec, HeaderedRows, RowValues,
};
pub use json::read_json;
pub use rows::{DecodedRows, TextEncoding, csv_rows};
