//! Palomar fixtures: plain CDM extract, one record per row.

use chargemaster_core::ChargeMasterParser;
use chargemaster_core::institutions::PalomarParser;
use chargemaster_ingest::{ArtifactSet, Cell};
use chargemaster_model::ChargeMasterEntry;

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

fn parse(rows: Vec<Vec<Cell>>) -> Vec<ChargeMasterEntry> {
    let parser = PalomarParser;
    let mut artifacts = ArtifactSet::new();
    artifacts.insert_rows(PalomarParser::ARTIFACT_URL, rows);
    parser
        .parse_artifacts(artifacts)
        .expect("parse artifacts")
        .collect::<Result<Vec<_>, _>>()
        .expect("decode rows")
}

#[test]
fn rows_become_single_gross_charge_records() {
    let rows = vec![
        vec![text("CDM Extract 05.22.2023")],
        vec![text("CDM"), text("CDM_DESC"), text("PRICE")],
        vec![text("1000101"), text("TRAUMA ACTIVATION LEVEL 1"), text("$15,964.00 ")],
        vec![text("1000102"), text("TRAUMA ACTIVATION LEVEL 2"), text("$7,982.00")],
    ];
    let actual = parse(rows);
    let expected = vec![
        ChargeMasterEntry {
            procedure_identifier: Some("1000101".to_string()),
            procedure_description: Some("TRAUMA ACTIVATION LEVEL 1".to_string()),
            gross_charge: Some(15964.0),
            ..Default::default()
        },
        ChargeMasterEntry {
            procedure_identifier: Some("1000102".to_string()),
            procedure_description: Some("TRAUMA ACTIVATION LEVEL 2".to_string()),
            gross_charge: Some(7982.0),
            ..Default::default()
        },
    ];
    assert_eq!(expected, actual);
}

#[test]
fn unparsable_price_leaves_the_field_absent() {
    let rows = vec![
        vec![text("CDM"), text("CDM_DESC"), text("PRICE")],
        vec![text("1000103"), text("OBSERVATION PER HR"), text("see note")],
    ];
    let actual = parse(rows);
    assert_eq!(actual.len(), 1);
    assert_eq!(actual[0].procedure_identifier.as_deref(), Some("1000103"));
    assert!(actual[0].gross_charge.is_none());
}

#[test]
fn institution_protocol() {
    let parser = PalomarParser;
    assert_eq!(parser.institution_name(), "Palomar");
    assert_eq!(parser.artifact_urls(), [PalomarParser::ARTIFACT_URL]);
}
