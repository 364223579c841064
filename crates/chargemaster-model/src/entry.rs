//! The canonical record emitted by every institution parser.
//!
//! A [`ChargeMasterEntry`] describes one (procedure, payer, patient-class)
//! priced line item. Every field is independently optional: absence means
//! "unknown / not applicable", never zero. Entries are immutable values —
//! construct one with struct-update syntax and never touch it again:
//!
//! ```
//! use chargemaster_model::ChargeMasterEntry;
//!
//! let entry = ChargeMasterEntry {
//!     payer: Some("Cash".to_string()),
//!     gross_charge: Some(10.0),
//!     ..Default::default()
//! };
//! assert!(entry.in_patient.is_none());
//! ```
//!
//! Emission order from a parser is unspecified, so entries carry a
//! deterministic total order for sort-then-compare assertions: fields are
//! compared in alphabetical field-name order, an absent value sorts before
//! any present value, and prices compare via `f64::total_cmp`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One priced, payer-qualified chargemaster line item.
///
/// The field set is fixed: adding or renaming a field is a breaking change to
/// the equality and ordering contract below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeMasterEntry {
    /// Site, facility, or region qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Institution-local item or procedure code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure_identifier: Option<String>,
    /// Free-text label for the line item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure_description: Option<String>,
    /// National Drug Code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndc_code: Option<String>,
    /// NUBC revenue (billing department) code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nubc_revenue_code: Option<String>,
    /// CPT procedure code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpt_code: Option<String>,
    /// HCPCS service code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hcpcs_code: Option<String>,
    /// MS-DRG bundled-payment code, zero-padded to three digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ms_drg_code: Option<String>,
    /// De-identified minimum negotiated rate across all payers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_reimbursement: Option<f64>,
    /// De-identified maximum negotiated rate across all payers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_reimbursement: Option<f64>,
    /// The negotiated rate for this entry's specific payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_reimbursement: Option<f64>,
    /// Undiscounted list price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_charge: Option<f64>,
    /// Payer this entry's rate applies to, or the `"Cash"` sentinel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    /// Payer sub-plan, when the source distinguishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Patient-class flag; absent when the source does not distinguish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_patient: Option<bool>,
    /// Source fields that were recognized but could not be normalized,
    /// keyed by their literal source column name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<BTreeMap<String, String>>,
}

impl Eq for ChargeMasterEntry {}

fn cmp_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

impl Ord for ChargeMasterEntry {
    /// Total order over entries: fields in alphabetical field-name order,
    /// first difference decides, absent before present.
    fn cmp(&self, other: &Self) -> Ordering {
        self.cpt_code
            .cmp(&other.cpt_code)
            .then_with(|| cmp_price(self.expected_reimbursement, other.expected_reimbursement))
            .then_with(|| self.extra_data.cmp(&other.extra_data))
            .then_with(|| cmp_price(self.gross_charge, other.gross_charge))
            .then_with(|| self.hcpcs_code.cmp(&other.hcpcs_code))
            .then_with(|| self.in_patient.cmp(&other.in_patient))
            .then_with(|| self.location.cmp(&other.location))
            .then_with(|| cmp_price(self.max_reimbursement, other.max_reimbursement))
            .then_with(|| cmp_price(self.min_reimbursement, other.min_reimbursement))
            .then_with(|| self.ms_drg_code.cmp(&other.ms_drg_code))
            .then_with(|| self.ndc_code.cmp(&other.ndc_code))
            .then_with(|| self.nubc_revenue_code.cmp(&other.nubc_revenue_code))
            .then_with(|| self.payer.cmp(&other.payer))
            .then_with(|| self.plan.cmp(&other.plan))
            .then_with(|| self.procedure_description.cmp(&other.procedure_description))
            .then_with(|| self.procedure_identifier.cmp(&other.procedure_identifier))
    }
}

impl PartialOrd for ChargeMasterEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ChargeMasterEntry {
    /// Renders present fields only, one `name : value` line each, in the
    /// canonical (alphabetical) field order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut line = |f: &mut fmt::Formatter<'_>, name: &str, value: String| {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{name} : {value}")
        };
        if let Some(v) = &self.cpt_code {
            line(f, "cpt_code", v.clone())?;
        }
        if let Some(v) = self.expected_reimbursement {
            line(f, "expected_reimbursement", v.to_string())?;
        }
        if let Some(v) = &self.extra_data {
            let rendered: Vec<String> = v.iter().map(|(k, val)| format!("{k}={val}")).collect();
            line(f, "extra_data", rendered.join(", "))?;
        }
        if let Some(v) = self.gross_charge {
            line(f, "gross_charge", v.to_string())?;
        }
        if let Some(v) = &self.hcpcs_code {
            line(f, "hcpcs_code", v.clone())?;
        }
        if let Some(v) = self.in_patient {
            line(f, "in_patient", v.to_string())?;
        }
        if let Some(v) = &self.location {
            line(f, "location", v.clone())?;
        }
        if let Some(v) = self.max_reimbursement {
            line(f, "max_reimbursement", v.to_string())?;
        }
        if let Some(v) = self.min_reimbursement {
            line(f, "min_reimbursement", v.to_string())?;
        }
        if let Some(v) = &self.ms_drg_code {
            line(f, "ms_drg_code", v.clone())?;
        }
        if let Some(v) = &self.ndc_code {
            line(f, "ndc_code", v.clone())?;
        }
        if let Some(v) = &self.nubc_revenue_code {
            line(f, "nubc_revenue_code", v.clone())?;
        }
        if let Some(v) = &self.payer {
            line(f, "payer", v.clone())?;
        }
        if let Some(v) = &self.plan {
            line(f, "plan", v.clone())?;
        }
        if let Some(v) = &self.procedure_description {
            line(f, "procedure_description", v.clone())?;
        }
        if let Some(v) = &self.procedure_identifier {
            line(f, "procedure_identifier", v.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_sorts_before_present() {
        let bare = ChargeMasterEntry::default();
        let priced = ChargeMasterEntry {
            gross_charge: Some(0.0),
            ..Default::default()
        };
        assert!(bare < priced);
    }

    #[test]
    fn display_lists_present_fields_only() {
        let entry = ChargeMasterEntry {
            payer: Some("Cash".to_string()),
            gross_charge: Some(10.0),
            ..Default::default()
        };
        let rendered = entry.to_string();
        assert_eq!(rendered, "gross_charge : 10\npayer : Cash");
    }
}
