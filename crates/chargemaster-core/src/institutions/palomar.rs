//! Palomar Health.
//!
//! A plain CDM extract: identifier, description, list price. No payer
//! expansion — every row yields a single gross-charge record.

use chargemaster_ingest::{ArtifactSet, Cell};
use chargemaster_model::ChargeMasterEntry;

use crate::error::Result;
use crate::parser::{ChargeMasterParser, RecordIter};
use crate::price;

#[derive(Debug, Default)]
pub struct PalomarParser;

impl PalomarParser {
    pub const INSTITUTION_NAME: &'static str = "Palomar";
    pub const ARTIFACT_URL: &'static str = "https://www.palomarhealth.org/wp-content/uploads/2023/06/Copy-of-05.22.2023-CDM-Extract-Distribution-002.xlsx";
    const ARTIFACT_URLS: &'static [&'static str] = &[Self::ARTIFACT_URL];
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    cdm: usize,
    description: usize,
    price: usize,
}

/// The three named columns sit in the first cells of the header row.
fn detect_columns(row: &[Cell]) -> Option<Columns> {
    let lead = &row[..row.len().min(3)];
    let position = |name: &str| {
        lead.iter()
            .position(|cell| cell.trimmed().as_str() == Some(name))
    };
    Some(Columns {
        cdm: position("CDM")?,
        description: position("CDM_DESC")?,
        price: position("PRICE")?,
    })
}

impl ChargeMasterParser for PalomarParser {
    fn institution_name(&self) -> &'static str {
        Self::INSTITUTION_NAME
    }

    fn artifact_urls(&self) -> &'static [&'static str] {
        Self::ARTIFACT_URLS
    }

    fn parse_artifacts(&self, mut artifacts: ArtifactSet) -> Result<RecordIter> {
        let rows = artifacts.take_rows(Self::ARTIFACT_URL)?;
        let mut columns: Option<Columns> = None;
        Ok(Box::new(rows.filter_map(move |row| match columns {
            None => {
                columns = detect_columns(&row);
                None
            }
            Some(at) => {
                if row.iter().all(Cell::is_empty) {
                    return None;
                }
                let cell = |index: usize| row.get(index).map_or(Cell::Empty, Cell::trimmed);
                Some(Ok(ChargeMasterEntry {
                    procedure_identifier: cell(at.cdm).to_text(),
                    procedure_description: cell(at.description).to_text(),
                    gross_charge: price::parse_price_lenient(&cell(at.price)),
                    ..Default::default()
                }))
            }
        })))
    }
}
