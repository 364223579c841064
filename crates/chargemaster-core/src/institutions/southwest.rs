//! Southwest Healthcare System.
//!
//! A spreadsheet whose rows arrive pre-decoded as typed cells. Thirteen
//! structural columns; every other column is a payer rate, with `-1` as
//! the institution's "not applicable" sentinel.

use std::collections::BTreeMap;

use chargemaster_ingest::{ArtifactSet, Cell, HeaderSpec, HeaderedRows, RowValues};
use chargemaster_model::ChargeMasterEntry;

use crate::code;
use crate::error::{ParseError, Result};
use crate::parser::{ChargeMasterParser, RecordIter};
use crate::price;

const KEY_COLUMNS: &[&str] = &[
    "Facility",
    "Description",
    "CDM",
    "Code Type",
    "DRG (If Applicable)",
    "CPT/HCPCS (If Applicable)",
    "EAPG (If Applicable)",
    "APC (If Applicable)",
    "Rev Code (If Applicable)",
    "Gross Charge",
    "Cash Price",
    "Minimum",
    "Maximum",
];

/// The institution's numeric "not applicable" rate sentinel.
const NOT_APPLICABLE: f64 = -1.0;

#[derive(Debug, Default)]
pub struct SouthwestParser;

impl SouthwestParser {
    pub const INSTITUTION_NAME: &'static str = "Southwest";
    pub const ARTIFACT_URL: &'static str =
        "https://uhsfilecdn.eskycity.net/ac/233059262_southwest-healthcare-system_standardcharges.csv";
    const ARTIFACT_URLS: &'static [&'static str] = &[Self::ARTIFACT_URL];
}

impl ChargeMasterParser for SouthwestParser {
    fn institution_name(&self) -> &'static str {
        Self::INSTITUTION_NAME
    }

    fn artifact_urls(&self) -> &'static [&'static str] {
        Self::ARTIFACT_URLS
    }

    fn parse_artifacts(&self, mut artifacts: ArtifactSet) -> Result<RecordIter> {
        let rows = artifacts.take_rows(Self::ARTIFACT_URL)?;
        let headered = HeaderedRows::new(rows.map(Ok), HeaderSpec::new(KEY_COLUMNS), Self::ARTIFACT_URL);
        Ok(Box::new(headered.flat_map(|row| {
            let entries = match row {
                Ok(row) => match decode_row(&row) {
                    Ok(entries) => entries.into_iter().map(Ok).collect(),
                    Err(err) => vec![Err(err)],
                },
                Err(err) => vec![Err(err.into())],
            };
            entries.into_iter()
        })))
    }
}

fn required<'a>(row: &'a RowValues, column: &'static str) -> Result<&'a Cell> {
    row.get(column).ok_or(ParseError::MissingColumn { column })
}

fn decode_row(row: &RowValues) -> Result<Vec<ChargeMasterEntry>> {
    let mut rates: BTreeMap<String, f64> = BTreeMap::new();
    for (column, cell) in row.columns() {
        if KEY_COLUMNS.contains(&column.name.as_str()) {
            continue;
        }
        let Some(amount) = price::parse_price_lenient(cell) else {
            continue;
        };
        if amount == NOT_APPLICABLE {
            continue;
        }
        rates.insert(column.name.clone(), amount);
    }

    let procedure_description = required(row, "Description")?.to_text();
    let mut procedure_identifier = required(row, "CDM")?.to_text();

    let mut cpt_code = None;
    let mut hcpcs_code = None;
    if let Some(code) = required(row, "CPT/HCPCS (If Applicable)")?.to_text() {
        if code::is_cpt(&code) {
            cpt_code = Some(code);
        } else {
            hcpcs_code = Some(code);
        }
    }

    let ms_drg_code = required(row, "DRG (If Applicable)")?
        .to_text()
        .map(|code| code::normalize_ms_drg(&code));

    let mut extra_data = BTreeMap::new();
    for column in ["EAPG (If Applicable)", "APC (If Applicable)"] {
        if let Some(value) = required(row, column)?.to_text() {
            extra_data.insert(column.to_string(), value);
        }
    }

    let gross_charge =
        price::parse_price_lenient(required(row, "Gross Charge")?).filter(|v| *v != NOT_APPLICABLE);
    let cash_price =
        price::parse_price_lenient(required(row, "Cash Price")?).filter(|v| *v != NOT_APPLICABLE);
    let min_reimbursement = price::parse_price_lenient(required(row, "Minimum")?);
    let max_reimbursement = price::parse_price_lenient(required(row, "Maximum")?);

    if procedure_identifier.is_none() {
        procedure_identifier = code::synthesize_identifier(
            cpt_code.as_deref(),
            hcpcs_code.as_deref(),
            ms_drg_code.as_deref(),
        );
    }

    let extra_data = (!extra_data.is_empty()).then_some(extra_data);

    let mut entries = Vec::new();
    if let Some(cash) = cash_price {
        entries.push(ChargeMasterEntry {
            procedure_identifier: procedure_identifier.clone(),
            procedure_description: procedure_description.clone(),
            gross_charge: Some(cash),
            ms_drg_code: ms_drg_code.clone(),
            hcpcs_code: hcpcs_code.clone(),
            cpt_code: cpt_code.clone(),
            extra_data: extra_data.clone(),
            payer: Some("Cash".to_string()),
            ..Default::default()
        });
    }
    for (payer, expected) in &rates {
        entries.push(ChargeMasterEntry {
            procedure_identifier: procedure_identifier.clone(),
            procedure_description: procedure_description.clone(),
            gross_charge,
            ms_drg_code: ms_drg_code.clone(),
            hcpcs_code: hcpcs_code.clone(),
            cpt_code: cpt_code.clone(),
            extra_data: extra_data.clone(),
            min_reimbursement,
            max_reimbursement,
            expected_reimbursement: Some(*expected),
            payer: Some(payer.clone()),
            ..Default::default()
        });
    }
    Ok(entries)
}
