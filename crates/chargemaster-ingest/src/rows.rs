//! Delimited-text decoding into cell rows.

use std::io::{Cursor, Read};

use csv::ReaderBuilder;

use crate::cell::Cell;
use crate::error::Result;

/// Text encoding of a delimited artifact.
///
/// Some institutions still publish Windows-1252 exports; those must be
/// decoded before row splitting so that quoted fields survive intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Windows1252,
}

/// Rows produced by [`csv_rows`], decoded on demand as the caller advances.
pub type DecodedRows = Box<dyn Iterator<Item = Result<Vec<Cell>>>>;

/// Decodes a byte stream of delimited text into lazy rows of cells.
///
/// Records are flexible-length (preamble rows are frequently ragged) and
/// quoted fields keep embedded line breaks as part of a single cell, which
/// is how multi-line payer header cells reach header discovery intact.
///
/// # Errors
///
/// Windows-1252 sources are decoded up front, so unreadable streams fail
/// here; row-level decode failures surface as `Err` items during iteration.
pub fn csv_rows(stream: Box<dyn Read>, encoding: TextEncoding) -> Result<DecodedRows> {
    let reader: Box<dyn Read> = match encoding {
        TextEncoding::Utf8 => stream,
        TextEncoding::Windows1252 => {
            let mut stream = stream;
            let mut bytes = Vec::new();
            stream.read_to_end(&mut bytes)?;
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Box::new(Cursor::new(text.into_owned().into_bytes()))
        }
    };

    let records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .into_records();

    Ok(Box::new(records.map(|record| {
        let record = record?;
        Ok(record.iter().map(Cell::from_csv_field).collect())
    })))
}
