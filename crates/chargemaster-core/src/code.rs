//! Code-system classification and decoding.
//!
//! Sources rarely label their codes by system. A bare five-character code is
//! CPT when it is four digits plus one alphanumeric, HCPCS otherwise; some
//! institutions instead prefix the system name onto the code in a single
//! composite field.

use std::sync::LazyLock;

use regex::Regex;

static CPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}[0-9A-Za-z]$").expect("CPT pattern"));
static MS_DRG_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^MS-DRG V37 \(FY\d{4}\) (.+)$").expect("MS-DRG prefix pattern"));
static CPT_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CPT.+? (.+)$").expect("CPT prefix pattern"));
static HCPCS_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^HCPCS (.+)$").expect("HCPCS prefix pattern"));

/// True when a bare code classifies as CPT (`^[0-9]{4}[0-9A-Za-z]$`).
/// Five-character codes that fail this test are HCPCS.
pub fn is_cpt(code: &str) -> bool {
    CPT_RE.is_match(code)
}

/// Zero-pads purely numeric MS-DRG codes to three digits (`1` -> `001`);
/// anything non-numeric is kept verbatim.
pub fn normalize_ms_drg(code: &str) -> String {
    let trimmed = code.trim();
    match trimmed.parse::<u32>() {
        Ok(number) => format!("{number:03}"),
        Err(_) => trimmed.to_string(),
    }
}

/// A code decoded out of a system-prefixed composite field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodedField {
    MsDrg(String),
    Cpt(String),
    Hcpcs(String),
}

/// Decodes a composite `<system> <code>` field
/// (`MS-DRG V37 (FYyyyy) <code>`, `CPT<suffix> <code>`, `HCPCS <code>`).
/// Returns `None` for unrecognized formats, which callers preserve verbatim
/// in `extra_data` rather than discard.
pub fn decode_prefixed_code(raw: &str) -> Option<CodedField> {
    let extract = |re: &Regex| {
        re.captures(raw)
            .map(|caps| caps[1].trim().to_uppercase())
    };
    if let Some(code) = extract(&MS_DRG_PREFIX_RE) {
        return Some(CodedField::MsDrg(normalize_ms_drg(&code)));
    }
    if let Some(code) = extract(&CPT_PREFIX_RE) {
        return Some(CodedField::Cpt(code));
    }
    extract(&HCPCS_PREFIX_RE).map(CodedField::Hcpcs)
}

/// Composes a stable identifier from whichever code was found, for rows
/// whose source provides no direct procedure identifier.
pub fn synthesize_identifier(
    cpt: Option<&str>,
    hcpcs: Option<&str>,
    ms_drg: Option<&str>,
) -> Option<String> {
    cpt.map(|code| format!("CPT_{code}"))
        .or_else(|| hcpcs.map(|code| format!("HCPCS_{code}")))
        .or_else(|| ms_drg.map(|code| format!("MS_DRG_{code}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_character_split() {
        assert!(is_cpt("51701"));
        assert!(is_cpt("3027F"));
        assert!(!is_cpt("C1776"));
        assert!(!is_cpt("P9021"));
        assert!(!is_cpt("516"));
    }

    #[test]
    fn drg_padding() {
        assert_eq!(normalize_ms_drg("1"), "001");
        assert_eq!(normalize_ms_drg("883"), "883");
        assert_eq!(normalize_ms_drg("PSYCH"), "PSYCH");
    }

    #[test]
    fn prefixed_composites() {
        assert_eq!(
            decode_prefixed_code("MS-DRG V37 (FY2020) 883"),
            Some(CodedField::MsDrg("883".to_string()))
        );
        assert_eq!(
            decode_prefixed_code("CPT\u{ab} 90847"),
            Some(CodedField::Cpt("90847".to_string()))
        );
        assert_eq!(
            decode_prefixed_code("HCPCS V2632"),
            Some(CodedField::Hcpcs("V2632".to_string()))
        );
        assert_eq!(decode_prefixed_code("REV 0250"), None);
    }

    #[test]
    fn identifier_synthesis_prefers_cpt() {
        assert_eq!(
            synthesize_identifier(Some("3027F"), None, None).as_deref(),
            Some("CPT_3027F")
        );
        assert_eq!(
            synthesize_identifier(None, Some("C1776"), Some("001")).as_deref(),
            Some("HCPCS_C1776")
        );
        assert_eq!(
            synthesize_identifier(None, None, Some("001")).as_deref(),
            Some("MS_DRG_001")
        );
        assert_eq!(synthesize_identifier(None, None, None), None);
    }
}
