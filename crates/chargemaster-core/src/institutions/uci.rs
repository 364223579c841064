//! University of California Irvine Medical Center.
//!
//! A JSON document keyed by semantic section name. Only the
//! `"Gross Charges"` section is normalized; each entry lists the outpatient
//! scheme price and its discounted cash price, either of which may be
//! absent or `"N/A"` and is then skipped for that payer only.

use chargemaster_ingest::{ArtifactSet, read_json};
use chargemaster_model::ChargeMasterEntry;
use serde_json::Value;

use crate::error::Result;
use crate::parser::{ChargeMasterParser, RecordIter};
use crate::price;

#[derive(Debug, Default)]
pub struct UciParser;

impl UciParser {
    pub const INSTITUTION_NAME: &'static str = "UCI";
    pub const ARTIFACT_URL: &'static str = "https://www.ucihealth.org/-/media/files/xlsx/patients-visitors/952226406-regentsoftheuniversityofcaliforniaatirvinehospital-standardcharges.json";
    const ARTIFACT_URLS: &'static [&'static str] = &[Self::ARTIFACT_URL];
}

impl ChargeMasterParser for UciParser {
    fn institution_name(&self) -> &'static str {
        Self::INSTITUTION_NAME
    }

    fn artifact_urls(&self) -> &'static [&'static str] {
        Self::ARTIFACT_URLS
    }

    fn parse_artifacts(&self, mut artifacts: ArtifactSet) -> Result<RecordIter> {
        let stream = artifacts.take_stream(Self::ARTIFACT_URL)?;
        let document = read_json(stream)?;

        if let Some(summary) = document
            .get("File Summary")
            .and_then(Value::as_array)
            .and_then(|entries| entries.first())
            && let Some(effective) = summary
                .get("Prices Posted And Effective")
                .and_then(Value::as_str)
        {
            tracing::debug!(effective, "gross charge file summary");
        }

        let entries = document
            .get("Gross Charges")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        if entries.is_empty() {
            tracing::warn!(
                url = Self::ARTIFACT_URL,
                "document has no Gross Charges section; artifact produced no records"
            );
        }
        Ok(Box::new(
            entries
                .into_iter()
                .flat_map(|entry| decode_entry(&entry))
                .map(Ok),
        ))
    }
}

fn text_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(value) => {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

fn decode_entry(entry: &Value) -> Vec<ChargeMasterEntry> {
    let procedure_identifier = text_field(entry, "Itemcode");
    let procedure_description = text_field(entry, "Description");
    let hcpcs_code = text_field(entry, "CDM HCPCS");
    let nubc_revenue_code = text_field(entry, "CDM Revenue Code");

    let schemes = [
        ("UCI HB", text_field(entry, "UCI HB OUTPATIENT RATE Price")),
        (
            "Cash",
            text_field(entry, "UCI HB OUTPATIENT RATE Discounted Cash Price"),
        ),
    ];

    let mut entries = Vec::new();
    for (payer, raw_price) in schemes {
        let Some(raw_price) = raw_price else { continue };
        let Some(gross_charge) = price::parse_price_lenient_text(&raw_price) else {
            continue;
        };
        entries.push(ChargeMasterEntry {
            procedure_identifier: procedure_identifier.clone(),
            procedure_description: procedure_description.clone(),
            hcpcs_code: hcpcs_code.clone(),
            in_patient: Some(false),
            payer: Some(payer.to_string()),
            gross_charge: Some(gross_charge),
            nubc_revenue_code: nubc_revenue_code.clone(),
            ..Default::default()
        });
    }
    entries
}
