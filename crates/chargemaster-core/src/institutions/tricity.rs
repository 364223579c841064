//! Tri-City Medical Center.
//!
//! One Windows-1252 CSV. After several rows of usage instructions, a wide
//! header names nine structural columns plus one column per contracted
//! payer; some payer header cells name several payers at once, joined by
//! line breaks inside the quoted cell, all sharing the column's rate.

use std::collections::BTreeMap;

use chargemaster_ingest::{
    ArtifactSet, Cell, HeaderSpec, HeaderedRows, RowValues, TextEncoding, csv_rows,
};
use chargemaster_model::ChargeMasterEntry;

use crate::code;
use crate::error::{ParseError, Result};
use crate::parser::{ChargeMasterParser, RecordIter};
use crate::price;

const KEY_COLUMNS: &[&str] = &[
    "Code Type",
    "Code",
    "Description",
    "Patient Type",
    "Rev Code",
    "Gross Charge",
    "Cash Price",
    "Min ($)",
    "Max ($)",
];

#[derive(Debug, Default)]
pub struct TriCityParser;

impl TriCityParser {
    pub const INSTITUTION_NAME: &'static str = "Tri-City";
    pub const ARTIFACT_URL: &'static str = "https://www.tricitymed.org/wp-content/uploads/2022/11/952126937_Tri-City-Medical-Center_standardcharges.csv";
    const ARTIFACT_URLS: &'static [&'static str] = &[Self::ARTIFACT_URL];
}

impl ChargeMasterParser for TriCityParser {
    fn institution_name(&self) -> &'static str {
        Self::INSTITUTION_NAME
    }

    fn artifact_urls(&self) -> &'static [&'static str] {
        Self::ARTIFACT_URLS
    }

    fn parse_artifacts(&self, mut artifacts: ArtifactSet) -> Result<RecordIter> {
        let stream = artifacts.take_stream(Self::ARTIFACT_URL)?;
        let rows = csv_rows(stream, TextEncoding::Windows1252)?;
        let spec = HeaderSpec::new(KEY_COLUMNS).with_alias_separator("\n");
        let headered = HeaderedRows::new(rows, spec, Self::ARTIFACT_URL);
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
    // Everything outside the structural set is a payer rate column.
    let mut rates: BTreeMap<String, f64> = BTreeMap::new();
    for (column, cell) in row.columns() {
        if KEY_COLUMNS.contains(&column.name.as_str()) {
            continue;
        }
        let Some(value) = cell.as_str() else { continue };
        if price::is_missing(value) {
            continue;
        }
        let Some(amount) = price::leading_amount(value) else {
            tracing::debug!(column = %column.name, value, "skipping unparsable rate cell");
            continue;
        };
        for payer in &column.aliases {
            rates.insert(payer.clone(), amount);
        }
    }

    let code_type = required(row, "Code Type")?.as_str().unwrap_or("");
    let code = required(row, "Code")?.as_str().unwrap_or("");
    let raw_description = required(row, "Description")?.as_str().unwrap_or("");

    let procedure_identifier = Some(format!("{code_type}_{code}"));
    let procedure_description = if raw_description.is_empty() {
        None
    } else {
        Some(strip_code_echo(raw_description, code))
    };

    let mut ms_drg_code = None;
    let mut cpt_code = None;
    let mut hcpcs_code = None;
    let mut extra_data = BTreeMap::new();
    let demote_code = |extra: &mut BTreeMap<String, String>| {
        extra.insert("Code Type".to_string(), code_type.to_string());
        extra.insert("Code".to_string(), code.to_string());
    };
    match code_type {
        "DRG" => match code.parse::<u32>() {
            Ok(number) => ms_drg_code = Some(format!("{number:03}")),
            Err(_) => demote_code(&mut extra_data),
        },
        "CDM" => {
            if code::is_cpt(code) {
                cpt_code = Some(code.to_string());
            } else if code.contains('|') {
                // Two HCPCS codes joined with a pipe; rare, kept verbatim.
                demote_code(&mut extra_data);
            } else {
                hcpcs_code = Some(code.to_string());
            }
        }
        "ICD10" | "ICD9" | "Softcoded" | "Pharmacy" => demote_code(&mut extra_data),
        _ => {}
    }

    let nubc_revenue_code = required(row, "Rev Code")?
        .as_str()
        .filter(|value| !price::is_missing(value))
        .map(str::to_string);
    let in_patient = Some(required(row, "Patient Type")?.as_str() == Some("IP"));

    let gross_charge = price::parse_price_lenient(required(row, "Gross Charge")?);
    let cash_price = price::parse_price_lenient(required(row, "Cash Price")?);
    let min_reimbursement = price::parse_price_lenient(required(row, "Min ($)")?);
    let max_reimbursement = price::parse_price_lenient(required(row, "Max ($)")?);

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
            nubc_revenue_code: nubc_revenue_code.clone(),
            payer: Some("Cash".to_string()),
            in_patient,
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
            nubc_revenue_code: nubc_revenue_code.clone(),
            cpt_code: cpt_code.clone(),
            extra_data: extra_data.clone(),
            min_reimbursement,
            max_reimbursement,
            expected_reimbursement: Some(*expected),
            payer: Some(payer.clone()),
            in_patient,
            ..Default::default()
        });
    }
    Ok(entries)
}

/// Descriptions frequently open with a repeat of the row's own code; drop it
/// and the punctuation separating it from the label proper.
fn strip_code_echo(description: &str, code: &str) -> String {
    let trimmed = description.trim();
    let rest = if code.is_empty() {
        trimmed
    } else {
        trimmed.strip_prefix(code).unwrap_or(trimmed)
    };
    let rest = rest
        .trim_start_matches(|ch: char| !ch.is_ascii_alphanumeric() && ch != '(' && ch != ')')
        .trim();
    if rest.is_empty() {
        trimmed.to_string()
    } else {
        rest.to_string()
    }
}
