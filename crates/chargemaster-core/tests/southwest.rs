//! Southwest fixtures: typed spreadsheet rows with the `-1` rate sentinel.

use chargemaster_core::ChargeMasterParser;
use chargemaster_core::institutions::SouthwestParser;
use chargemaster_ingest::{ArtifactSet, Cell};
use chargemaster_model::ChargeMasterEntry;

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

/// Mirrors how the institution's workbook lays out: optional junk preamble,
/// one header row, one data row. `scramble` reverses the column order to
/// prove positions are resolved by name.
fn workbook(values: &[(&str, Cell)], scramble: bool, junk: bool) -> Vec<Vec<Cell>> {
    let mut ordered: Vec<(&str, Cell)> = values.to_vec();
    if scramble {
        ordered.reverse();
    }
    let mut rows = Vec::new();
    if junk {
        rows.push(vec![text("Hospital Name: Southwest Healthcare System")]);
        rows.push(vec![text("Price Effective Date: 4/1/2023")]);
    }
    rows.push(ordered.iter().map(|(name, _)| text(name)).collect());
    rows.push(ordered.iter().map(|(_, cell)| cell.clone()).collect());
    rows
}

fn parse(rows: Vec<Vec<Cell>>) -> Vec<ChargeMasterEntry> {
    let parser = SouthwestParser;
    let mut artifacts = ArtifactSet::new();
    artifacts.insert_rows(SouthwestParser::ARTIFACT_URL, rows);
    parser
        .parse_artifacts(artifacts)
        .expect("parse artifacts")
        .collect::<Result<Vec<_>, _>>()
        .expect("decode rows")
}

fn sorted(mut entries: Vec<ChargeMasterEntry>) -> Vec<ChargeMasterEntry> {
    entries.sort();
    entries
}

fn implant_row() -> Vec<(&'static str, Cell)> {
    vec![
        ("Facility", text("Southwest Healthcare System")),
        ("Description", text("COMPONENT FEM CR LT 4N")),
        ("CDM", Cell::Int(38000501)),
        ("Code Type", text("Chargemaster")),
        ("DRG (If Applicable)", Cell::Empty),
        ("CPT/HCPCS (If Applicable)", text("C1776")),
        ("EAPG (If Applicable)", Cell::Empty),
        ("APC (If Applicable)", Cell::Empty),
        ("Rev Code (If Applicable)", Cell::Int(278)),
        ("Gross Charge", Cell::Int(1922)),
        ("Cash Price", Cell::Int(769)),
        ("Minimum", Cell::Int(398)),
        ("Maximum", Cell::Int(5419)),
        ("Aetna HMO/PPO", Cell::Int(848)),
        ("Aetna Medicare", Cell::Int(-1)),
        ("Blue Cross Anthem", Cell::Int(761)),
        ("Blue Cross Medi-Cal", Cell::Int(-1)),
        ("Blue Shield Senior", Cell::Int(-1)),
        ("Cigna HMO/PPO", Cell::Int(550)),
        ("Epic Health", Cell::Int(2956)),
        ("Epic Health Plan Medicare", Cell::Int(-1)),
        ("Exclusive Care", Cell::Int(3941)),
        ("First Health", Cell::Int(884)),
        ("HealthNet", Cell::Int(446)),
        ("HealthNet Medi-Cal", Cell::Int(-1)),
        ("HealthNet Medicare", Cell::Int(4050)),
        ("Heritage Commercial", Cell::Int(475)),
        ("Heritage Medi-Cal", Cell::Int(-1)),
        ("Heritage Medicare", Cell::Int(398)),
        ("Humana Medicare", Cell::Int(-1)),
        ("Kaiser", Cell::Int(646)),
        ("Kaiser Medi-Cal", Cell::Int(-1)),
        ("Molina", Cell::Int(-1)),
        ("Multiplan", Cell::Int(1730)),
        ("Palomar Health", Cell::Int(942)),
        ("Scan Medicare", Cell::Int(-1)),
        ("Sharp Health Plan", Cell::Int(5419)),
        ("United Healthcare HMO", Cell::Int(-1)),
        ("United Healthcare Medicare", Cell::Int(-1)),
    ]
}

fn implant_expected() -> Vec<ChargeMasterEntry> {
    let base = ChargeMasterEntry {
        gross_charge: Some(1922.0),
        hcpcs_code: Some("C1776".to_string()),
        max_reimbursement: Some(5419.0),
        min_reimbursement: Some(398.0),
        procedure_description: Some("COMPONENT FEM CR LT 4N".to_string()),
        procedure_identifier: Some("38000501".to_string()),
        ..Default::default()
    };
    let rates: &[(&str, f64)] = &[
        ("Aetna HMO/PPO", 848.0),
        ("Blue Cross Anthem", 761.0),
        ("Cigna HMO/PPO", 550.0),
        ("Epic Health", 2956.0),
        ("Exclusive Care", 3941.0),
        ("First Health", 884.0),
        ("HealthNet", 446.0),
        ("HealthNet Medicare", 4050.0),
        ("Heritage Commercial", 475.0),
        ("Heritage Medicare", 398.0),
        ("Kaiser", 646.0),
        ("Multiplan", 1730.0),
        ("Palomar Health", 942.0),
        ("Sharp Health Plan", 5419.0),
    ];
    let mut expected: Vec<ChargeMasterEntry> = rates
        .iter()
        .map(|(payer, rate)| ChargeMasterEntry {
            expected_reimbursement: Some(*rate),
            payer: Some((*payer).to_string()),
            ..base.clone()
        })
        .collect();
    expected.push(ChargeMasterEntry {
        gross_charge: Some(769.0),
        hcpcs_code: Some("C1776".to_string()),
        payer: Some("Cash".to_string()),
        procedure_description: Some("COMPONENT FEM CR LT 4N".to_string()),
        procedure_identifier: Some("38000501".to_string()),
        ..Default::default()
    });
    expected
}

#[test]
fn sentinel_rates_are_excluded() {
    let actual = parse(workbook(&implant_row(), false, true));
    assert_eq!(sorted(implant_expected()), sorted(actual));
}

#[test]
fn scrambled_columns_parse_identically() {
    let actual = parse(workbook(&implant_row(), true, false));
    assert_eq!(sorted(implant_expected()), sorted(actual));
}

#[test]
fn apc_codes_are_demoted_to_extra_data() {
    let row = vec![
        ("Facility", text("Southwest Healthcare System")),
        ("Description", text("PATHOGEN REDUCED PLATELETS")),
        ("CDM", Cell::Int(50302033)),
        ("Code Type", text("Chargemaster")),
        ("DRG (If Applicable)", Cell::Empty),
        ("CPT/HCPCS (If Applicable)", text("P9073")),
        ("EAPG (If Applicable)", Cell::Empty),
        ("APC (If Applicable)", text("9536")),
        ("Rev Code (If Applicable)", Cell::Int(390)),
        ("Gross Charge", Cell::Int(793)),
        ("Cash Price", Cell::Int(317)),
        ("Minimum", Cell::Int(266)),
        ("Maximum", Cell::Int(974)),
        ("Aetna HMO/PPO", Cell::Int(288)),
    ];
    let extra = std::collections::BTreeMap::from([(
        "APC (If Applicable)".to_string(),
        "9536".to_string(),
    )]);
    let expected = vec![
        ChargeMasterEntry {
            expected_reimbursement: Some(288.0),
            gross_charge: Some(793.0),
            hcpcs_code: Some("P9073".to_string()),
            max_reimbursement: Some(974.0),
            min_reimbursement: Some(266.0),
            payer: Some("Aetna HMO/PPO".to_string()),
            procedure_description: Some("PATHOGEN REDUCED PLATELETS".to_string()),
            procedure_identifier: Some("50302033".to_string()),
            extra_data: Some(extra.clone()),
            ..Default::default()
        },
        ChargeMasterEntry {
            gross_charge: Some(317.0),
            hcpcs_code: Some("P9073".to_string()),
            payer: Some("Cash".to_string()),
            procedure_description: Some("PATHOGEN REDUCED PLATELETS".to_string()),
            procedure_identifier: Some("50302033".to_string()),
            extra_data: Some(extra),
            ..Default::default()
        },
    ];
    let actual = parse(workbook(&row, true, false));
    assert_eq!(sorted(expected), sorted(actual));
}

#[test]
fn cpt_identifier_is_synthesized_when_cdm_is_blank() {
    let row = vec![
        ("Facility", text("Southwest Healthcare System")),
        ("Description", text("Spirom fev/fvc>/=70%/w/ocopd")),
        ("CDM", Cell::Empty),
        ("Code Type", text("Other CPT/HCPCS")),
        ("DRG (If Applicable)", Cell::Empty),
        ("CPT/HCPCS (If Applicable)", text("3027F")),
        ("EAPG (If Applicable)", Cell::Empty),
        ("APC (If Applicable)", Cell::Empty),
        ("Rev Code (If Applicable)", Cell::Empty),
        ("Gross Charge", Cell::Int(-1)),
        ("Cash Price", Cell::Int(-1)),
        ("Minimum", Cell::Int(10526)),
        ("Maximum", Cell::Int(10526)),
        ("Blue Shield Select", Cell::Int(10526)),
    ];
    let expected = vec![ChargeMasterEntry {
        expected_reimbursement: Some(10526.0),
        procedure_identifier: Some("CPT_3027F".to_string()),
        cpt_code: Some("3027F".to_string()),
        max_reimbursement: Some(10526.0),
        min_reimbursement: Some(10526.0),
        payer: Some("Blue Shield Select".to_string()),
        procedure_description: Some("Spirom fev/fvc>/=70%/w/ocopd".to_string()),
        ..Default::default()
    }];
    let actual = parse(workbook(&row, true, false));
    assert_eq!(sorted(expected), sorted(actual));
}

#[test]
fn integer_drg_codes_are_zero_padded() {
    let row = vec![
        ("Facility", text("Southwest Healthcare System")),
        (
            "Description",
            text("HEART TRANSPLANT OR IMPLANT OF HEART ASSIST SYSTEM WITH MCC"),
        ),
        ("CDM", Cell::Empty),
        ("Code Type", text("MS-DRG")),
        ("DRG (If Applicable)", Cell::Int(1)),
        ("CPT/HCPCS (If Applicable)", Cell::Empty),
        ("EAPG (If Applicable)", Cell::Empty),
        ("APC (If Applicable)", Cell::Empty),
        ("Rev Code (If Applicable)", Cell::Empty),
        ("Gross Charge", Cell::Int(-1)),
        ("Cash Price", Cell::Int(-1)),
        ("Minimum", Cell::Int(239580)),
        ("Maximum", Cell::Int(448170)),
        ("Aetna Medicare", Cell::Int(254017)),
    ];
    let expected = vec![ChargeMasterEntry {
        expected_reimbursement: Some(254017.0),
        procedure_identifier: Some("MS_DRG_001".to_string()),
        ms_drg_code: Some("001".to_string()),
        max_reimbursement: Some(448170.0),
        min_reimbursement: Some(239580.0),
        payer: Some("Aetna Medicare".to_string()),
        procedure_description: Some(
            "HEART TRANSPLANT OR IMPLANT OF HEART ASSIST SYSTEM WITH MCC".to_string(),
        ),
        ..Default::default()
    }];
    let actual = parse(workbook(&row, true, false));
    assert_eq!(sorted(expected), sorted(actual));
}

#[test]
fn institution_protocol() {
    let parser = SouthwestParser;
    assert_eq!(parser.institution_name(), "Southwest");
    assert_eq!(parser.artifact_urls(), [SouthwestParser::ARTIFACT_URL]);
}
