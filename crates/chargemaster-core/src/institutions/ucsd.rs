//! UC San Diego Health.
//!
//! A JSON array of wide row objects. Structural keys cover the identifiers
//! and code fields; every remaining key is a rate column whose name lists
//! one or more plan names joined by `;`, each alias sharing the column's
//! rate. `Variable` is this source's "no fixed rate" sentinel.

use std::collections::BTreeMap;

use chargemaster_ingest::{ArtifactSet, read_json};
use chargemaster_model::ChargeMasterEntry;
use serde_json::Value;

use crate::code::{self, CodedField};
use crate::error::Result;
use crate::parser::{ChargeMasterParser, RecordIter};
use crate::price;

const KEY_COLUMNS: &[&str] = &[
    "PROCEDURE",
    "Code Type",
    "Code",
    "NDC",
    "Rev Code",
    "PROCEDURE_DESCRIPTION",
    "QUANTITY",
    "IP_PRICE",
    "REIMB_MIN",
    "REIMB_MAX",
];

#[derive(Debug, Default)]
pub struct UcsdParser;

impl UcsdParser {
    pub const INSTITUTION_NAME: &'static str = "UCSD";
    pub const ARTIFACT_URL: &'static str = "https://health.ucsd.edu/-/media/files/billing/956006144_uc-san-diego-health_standardcharges.json";
    const ARTIFACT_URLS: &'static [&'static str] = &[Self::ARTIFACT_URL];
}

impl ChargeMasterParser for UcsdParser {
    fn institution_name(&self) -> &'static str {
        Self::INSTITUTION_NAME
    }

    fn artifact_urls(&self) -> &'static [&'static str] {
        Self::ARTIFACT_URLS
    }

    fn parse_artifacts(&self, mut artifacts: ArtifactSet) -> Result<RecordIter> {
        let stream = artifacts.take_stream(Self::ARTIFACT_URL)?;
        let document = read_json(stream)?;
        let rows = match document {
            Value::Array(rows) => rows,
            _ => {
                tracing::warn!(
                    url = Self::ARTIFACT_URL,
                    "document is not a row array; artifact produced no records"
                );
                Vec::new()
            }
        };
        Ok(Box::new(
            rows.into_iter().flat_map(|row| decode_row(&row)).map(Ok),
        ))
    }
}

fn text_field(row: &Value, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(value) => {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

fn rate_value(value: &Value) -> Option<f64> {
    match value {
        Value::String(raw) => price::parse_price_lenient_text(raw),
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
}

/// Plan alias names occasionally carry U+FFFD from the source's own botched
/// transcoding; scrub it before emission.
fn clean_plan_name(raw: &str) -> String {
    raw.replace('\u{fffd}', "").trim().to_string()
}

fn decode_row(row: &Value) -> Vec<ChargeMasterEntry> {
    let Some(fields) = row.as_object() else {
        return Vec::new();
    };

    let procedure_identifier = text_field(row, "PROCEDURE");
    let procedure_description = text_field(row, "PROCEDURE_DESCRIPTION");
    let ndc_code = text_field(row, "NDC");
    // Rev Code values spell out the department ("0250 - PHARMACY - ..."):
    // only the leading code token is the NUBC code.
    let nubc_revenue_code = text_field(row, "Rev Code")
        .map(|value| value.split(" - ").next().unwrap_or_default().trim().to_string());

    let mut cpt_code = None;
    let mut hcpcs_code = None;
    let mut ms_drg_code = None;
    let mut extra_data = BTreeMap::new();
    if let Some(raw) = text_field(row, "Code") {
        match code::decode_prefixed_code(&raw) {
            Some(CodedField::Cpt(value)) => cpt_code = Some(value),
            Some(CodedField::Hcpcs(value)) => hcpcs_code = Some(value),
            Some(CodedField::MsDrg(value)) => ms_drg_code = Some(value),
            None => {
                extra_data.insert("Code".to_string(), raw);
            }
        }
    }
    for key in ["QUANTITY", "IP_PRICE"] {
        if let Some(value) = text_field(row, key) {
            extra_data.insert(key.to_string(), value);
        }
    }

    let min_reimbursement = row.get("REIMB_MIN").and_then(rate_value);
    let max_reimbursement = row.get("REIMB_MAX").and_then(rate_value);

    let extra_data = (!extra_data.is_empty()).then_some(extra_data);

    let mut entries = Vec::new();
    for (column, value) in fields {
        if KEY_COLUMNS.contains(&column.as_str()) {
            continue;
        }
        let Some(expected) = rate_value(value) else {
            continue;
        };
        for alias in column.split(';') {
            let plan = clean_plan_name(alias);
            if plan.is_empty() {
                continue;
            }
            entries.push(ChargeMasterEntry {
                procedure_identifier: procedure_identifier.clone(),
                procedure_description: procedure_description.clone(),
                ndc_code: ndc_code.clone(),
                nubc_revenue_code: nubc_revenue_code.clone(),
                cpt_code: cpt_code.clone(),
                hcpcs_code: hcpcs_code.clone(),
                ms_drg_code: ms_drg_code.clone(),
                min_reimbursement,
                max_reimbursement,
                expected_reimbursement: Some(expected),
                plan: Some(plan),
                extra_data: extra_data.clone(),
                ..Default::default()
            });
        }
    }
    entries
}
