//! Cedars-Sinai Medical Center.
//!
//! A fee-schedule extract with twin price columns. Each source row fans out
//! into exactly two records: the outpatient fee and the inpatient/ED fee
//! (which falls back to the outpatient amount when blank). Parsing only
//! begins once a row matches the expected five-column header verbatim.

use chargemaster_ingest::{ArtifactSet, Cell};
use chargemaster_model::ChargeMasterEntry;

use crate::code;
use crate::error::Result;
use crate::parser::{ChargeMasterParser, RecordIter};
use crate::price;

const EXPECTED_HEADER: [&str; 5] = [
    "EAP PROC CODE",
    "EAP PROC NAME",
    "DEFAULT CPT/ HCPCS CODE",
    "DEFAULT OP FEE SCHEDULE",
    "IP/ED FEE SCHEDULE",
];

#[derive(Debug, Default)]
pub struct CedarsSinaiParser;

impl CedarsSinaiParser {
    pub const INSTITUTION_NAME: &'static str = "Cedars-Sinai";
    pub const ARTIFACT_URL: &'static str = "https://www.cedars-sinai.org/content/dam/cedars-sinai/billing-insurance/documents/cedars-sinai-changemaster-july-2022.xlsx";
    const ARTIFACT_URLS: &'static [&'static str] = &[Self::ARTIFACT_URL];
}

fn is_header(row: &[Cell]) -> bool {
    row.len() >= EXPECTED_HEADER.len()
        && EXPECTED_HEADER
            .iter()
            .zip(row.iter())
            .all(|(expected, cell)| cell.trimmed().as_str() == Some(*expected))
}

impl ChargeMasterParser for CedarsSinaiParser {
    fn institution_name(&self) -> &'static str {
        Self::INSTITUTION_NAME
    }

    fn artifact_urls(&self) -> &'static [&'static str] {
        Self::ARTIFACT_URLS
    }

    fn parse_artifacts(&self, mut artifacts: ArtifactSet) -> Result<RecordIter> {
        let rows = artifacts.take_rows(Self::ARTIFACT_URL)?;
        let mut found_header = false;
        Ok(Box::new(
            rows.flat_map(move |row| {
                if !found_header {
                    found_header = is_header(&row);
                    return Vec::new().into_iter();
                }
                if row.iter().all(Cell::is_empty) {
                    return Vec::new().into_iter();
                }
                decode_row(&row).into_iter()
            })
            .map(Ok),
        ))
    }
}

fn decode_row(row: &[Cell]) -> Vec<ChargeMasterEntry> {
    let cell = |index: usize| row.get(index).map_or(Cell::Empty, Cell::trimmed);

    let procedure_identifier = cell(0).to_text();
    let procedure_description = cell(1).to_text();
    let op_charge = price::parse_price_lenient(&cell(3));
    let ip_charge = price::parse_price_lenient(&cell(4)).or(op_charge);

    let mut cpt_code = None;
    let mut hcpcs_code = None;
    if let Some(raw) = cell(2).to_text() {
        if code::is_cpt(&raw) {
            cpt_code = Some(raw);
        } else {
            hcpcs_code = Some(raw);
        }
    }

    vec![
        ChargeMasterEntry {
            location: Some("all".to_string()),
            procedure_identifier: procedure_identifier.clone(),
            procedure_description: procedure_description.clone(),
            gross_charge: op_charge,
            in_patient: Some(false),
            ..Default::default()
        },
        ChargeMasterEntry {
            location: Some("all".to_string()),
            procedure_identifier,
            procedure_description,
            gross_charge: ip_charge,
            in_patient: Some(true),
            cpt_code,
            hcpcs_code,
            ..Default::default()
        },
    ]
}
