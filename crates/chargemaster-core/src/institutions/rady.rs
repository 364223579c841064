//! Rady Children's Hospital.
//!
//! A narrow spreadsheet published under two different header vocabularies
//! over time. The older layout has no identifier column at all, so an
//! ordinal identifier is synthesized from row position. Descriptions carry
//! a literal `RCH ` site prefix and sometimes a parenthesized CPT code.

use std::sync::LazyLock;

use chargemaster_ingest::{ArtifactSet, Cell};
use chargemaster_model::ChargeMasterEntry;
use regex::Regex;

use crate::error::Result;
use crate::parser::{ChargeMasterParser, RecordIter};
use crate::price;

static CPT_LEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(([0-9]{4}[0-9A-Za-z])\)\s*(.*)$").expect("CPT lead pattern"));

#[derive(Debug, Default)]
pub struct RadyParser;

impl RadyParser {
    pub const INSTITUTION_NAME: &'static str = "Rady";
    pub const ARTIFACT_URL: &'static str =
        "https://www.rchsd.org/documents/2022/07/chargemaster-2.xlsx/";
    const ARTIFACT_URLS: &'static [&'static str] = &[Self::ARTIFACT_URL];
}

/// Column positions for whichever header vocabulary the artifact uses.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// `Procedure Name` / `Price`; rows carry no identifier of their own.
    Unkeyed { description: usize, price: usize },
    /// `Itemcode` / `Item Description` / `Load Price`.
    Keyed {
        identifier: usize,
        description: usize,
        price: usize,
    },
}

fn detect_layout(row: &[Cell]) -> Option<Layout> {
    let position = |name: &str| {
        row.iter()
            .position(|cell| cell.trimmed().as_str() == Some(name))
    };
    if let (Some(identifier), Some(description), Some(price)) = (
        position("Itemcode"),
        position("Item Description"),
        position("Load Price"),
    ) {
        return Some(Layout::Keyed {
            identifier,
            description,
            price,
        });
    }
    if let (Some(description), Some(price)) = (position("Procedure Name"), position("Price")) {
        return Some(Layout::Unkeyed { description, price });
    }
    None
}

impl ChargeMasterParser for RadyParser {
    fn institution_name(&self) -> &'static str {
        Self::INSTITUTION_NAME
    }

    fn artifact_urls(&self) -> &'static [&'static str] {
        Self::ARTIFACT_URLS
    }

    fn parse_artifacts(&self, mut artifacts: ArtifactSet) -> Result<RecordIter> {
        let rows = artifacts.take_rows(Self::ARTIFACT_URL)?;
        let mut layout: Option<Layout> = None;
        let mut ordinal = 0usize;
        Ok(Box::new(rows.filter_map(move |row| match layout {
            None => {
                layout = detect_layout(&row);
                if let Some(found) = layout {
                    tracing::debug!(layout = ?found, "header row accepted");
                }
                None
            }
            Some(active) => {
                if row.iter().all(Cell::is_empty) {
                    return None;
                }
                ordinal += 1;
                decode_row(active, &row, ordinal).map(Ok)
            }
        })))
    }
}

fn cell(row: &[Cell], index: usize) -> Cell {
    row.get(index).map_or(Cell::Empty, Cell::trimmed)
}

fn decode_row(layout: Layout, row: &[Cell], ordinal: usize) -> Option<ChargeMasterEntry> {
    let (identifier, description_cell, price_cell) = match layout {
        Layout::Unkeyed { description, price } => {
            (Some(ordinal.to_string()), cell(row, description), cell(row, price))
        }
        Layout::Keyed {
            identifier,
            description,
            price,
        } => (
            cell(row, identifier).to_text(),
            cell(row, description),
            cell(row, price),
        ),
    };

    // A price that is neither numeric nor missing ("Additional Input
    // Required") disqualifies the whole row: there is nothing to price.
    let Some(gross_charge) = price::parse_price_lenient(&price_cell) else {
        tracing::debug!(row = ordinal, "skipping row without a usable price");
        return None;
    };

    let (cpt_code, procedure_description) = split_description(description_cell.as_str()?);

    Some(ChargeMasterEntry {
        procedure_identifier: identifier,
        procedure_description: Some(procedure_description),
        cpt_code,
        gross_charge: Some(gross_charge),
        ..Default::default()
    })
}

/// Lifts an optional leading `(<CPT code>)` out of the description, then
/// drops the literal `RCH ` site prefix.
fn split_description(raw: &str) -> (Option<String>, String) {
    let (cpt_code, rest) = match CPT_LEAD_RE.captures(raw) {
        Some(caps) => (
            Some(caps[1].to_string()),
            caps.get(2).map_or("", |m| m.as_str()).to_string(),
        ),
        None => (None, raw.to_string()),
    };
    let description = rest.strip_prefix("RCH ").unwrap_or(&rest).trim().to_string();
    (cpt_code, description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_prefixes() {
        assert_eq!(
            split_description("RCH PEDIATRIC PRIVATE ROOM CHARGE"),
            (None, "PEDIATRIC PRIVATE ROOM CHARGE".to_string())
        );
        assert_eq!(
            split_description("(99202) RCH EXPANDED PROBLEM FOCUSED,STRAIGHTFORWARD-20MIN"),
            (
                Some("99202".to_string()),
                "EXPANDED PROBLEM FOCUSED,STRAIGHTFORWARD-20MIN".to_string()
            )
        );
    }
}
