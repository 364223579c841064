//! Loma Linda University Health.
//!
//! Four Windows-1252 CSVs, one per facility; the facility name rides on
//! every record as `location`. Column names are lower snake case, payer
//! columns included — payer names are un-snake-cased on output. The code
//! column is a composite `<system> <code>` field.

use std::collections::BTreeMap;

use chargemaster_ingest::{
    ArtifactSet, Cell, HeaderSpec, HeaderedRows, RowValues, TextEncoding, csv_rows,
};
use chargemaster_model::ChargeMasterEntry;

use crate::code::{self, CodedField};
use crate::error::{ParseError, Result};
use crate::parser::{ChargeMasterParser, RecordIter};
use crate::price;

const KEY_COLUMNS: &[&str] = &[
    "procedure",
    "code",
    "description",
    "gross_pay",
    "cash_pay",
    "minimum",
    "maximum",
];

const ARTIFACT_LOCATIONS: &[(&str, &str)] = &[
    (
        "https://lluh.org/sites/lluh.org/files/953522679_lomalindauniversitymedicalcenter_standardcharges.csv",
        "Medical Center",
    ),
    (
        "https://lluh.org/sites/lluh.org/files/463214504_lomalindauniversitychildrenshospital_standardcharges.csv",
        "Children's Hospital",
    ),
    (
        "https://lluh.org/sites/lluh.org/files/330245579_lomalindauniversitybehavioralmedicalcenter_standardcharges.csv",
        "Behavioral Medicine Center",
    ),
    (
        "https://lluh.org/sites/lluh.org/files/371705906_lomalindauniversitymedicalcenter-murrieta_standardcharges.csv",
        "Medical Center \u{2013} Murrieta",
    ),
];

#[derive(Debug, Default)]
pub struct LluhParser;

impl LluhParser {
    pub const INSTITUTION_NAME: &'static str = "LLUH";
    const ARTIFACT_URLS: &'static [&'static str] = &[
        ARTIFACT_LOCATIONS[0].0,
        ARTIFACT_LOCATIONS[1].0,
        ARTIFACT_LOCATIONS[2].0,
        ARTIFACT_LOCATIONS[3].0,
    ];
}

impl ChargeMasterParser for LluhParser {
    fn institution_name(&self) -> &'static str {
        Self::INSTITUTION_NAME
    }

    fn artifact_urls(&self) -> &'static [&'static str] {
        Self::ARTIFACT_URLS
    }

    fn parse_artifacts(&self, mut artifacts: ArtifactSet) -> Result<RecordIter> {
        // Parse whichever subset of the facility files the caller supplied.
        let mut sections = Vec::new();
        for (url, location) in ARTIFACT_LOCATIONS {
            if !artifacts.contains(url) {
                continue;
            }
            let stream = artifacts.take_stream(url)?;
            let rows = csv_rows(stream, TextEncoding::Windows1252)?;
            let headered = HeaderedRows::new(rows, HeaderSpec::new(KEY_COLUMNS), *url);
            sections.push(headered.flat_map(move |row| {
                let entries = match row {
                    Ok(row) => match decode_row(&row, location) {
                        Ok(entries) => entries.into_iter().map(Ok).collect(),
                        Err(err) => vec![Err(err)],
                    },
                    Err(err) => vec![Err(err.into())],
                };
                entries.into_iter()
            }));
        }
        Ok(Box::new(sections.into_iter().flatten()))
    }
}

fn required<'a>(row: &'a RowValues, column: &'static str) -> Result<&'a Cell> {
    row.get(column).ok_or(ParseError::MissingColumn { column })
}

fn decode_row(row: &RowValues, location: &str) -> Result<Vec<ChargeMasterEntry>> {
    let mut rates: BTreeMap<String, f64> = BTreeMap::new();
    for (column, cell) in row.columns() {
        if KEY_COLUMNS.contains(&column.name.as_str()) {
            continue;
        }
        if let Some(amount) = price::parse_price_lenient(cell) {
            rates.insert(column.name.replace('_', " "), amount);
        }
    }

    let procedure_description = required(row, "description")?.to_text();
    let procedure_identifier = required(row, "procedure")?.to_text();

    let mut ms_drg_code = None;
    let mut cpt_code = None;
    let mut hcpcs_code = None;
    let mut extra_data = BTreeMap::new();
    if let Some(raw) = required(row, "code")?.as_str() {
        match code::decode_prefixed_code(raw) {
            Some(CodedField::MsDrg(value)) => ms_drg_code = Some(value),
            Some(CodedField::Cpt(value)) => cpt_code = Some(value),
            Some(CodedField::Hcpcs(value)) => hcpcs_code = Some(value),
            None => {
                extra_data.insert("code".to_string(), raw.to_string());
            }
        }
    }

    let gross_charge = price::parse_price_lenient(required(row, "gross_pay")?);
    // A zero cash price is treated the same as no cash price here.
    let cash_price = price::parse_price_lenient(required(row, "cash_pay")?).filter(|v| *v != 0.0);
    let min_reimbursement = price::parse_price_lenient(required(row, "minimum")?);
    let max_reimbursement = price::parse_price_lenient(required(row, "maximum")?);

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
            location: Some(location.to_string()),
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
            location: Some(location.to_string()),
            ..Default::default()
        });
    }
    Ok(entries)
}
