//! Tests for the canonical record's equality, ordering, and serde contract.

use chargemaster_model::ChargeMasterEntry;
use proptest::prelude::*;

#[test]
fn equality_by_value() {
    let a = ChargeMasterEntry {
        payer: Some("COMMERCIAL".to_string()),
        plan: Some("KAISER FOUNDATION HEALTH PLAN, INC.".to_string()),
        gross_charge: Some(11834.0),
        location: Some("San Diego".to_string()),
        ..Default::default()
    };
    let b = a.clone();
    assert_eq!(a, b);
    assert!(a >= b && a <= b);
}

#[test]
fn inequality_by_value() {
    let a = ChargeMasterEntry {
        procedure_description: Some("ROOM & BOARD-CCU".to_string()),
        in_patient: Some(true),
        payer: Some("COMMERCIAL".to_string()),
        plan: Some("KAISER FOUNDATION HEALTH PLAN, INC.".to_string()),
        gross_charge: Some(11834.0),
        location: Some("San Diego".to_string()),
        ..Default::default()
    };
    let b = ChargeMasterEntry {
        in_patient: Some(false),
        ..a.clone()
    };
    assert_ne!(a, b);
    assert!(b < a);
}

#[test]
fn inequality_by_field_set() {
    // Shared fields all equal; the record missing a field sorts first.
    let a = ChargeMasterEntry {
        payer: Some("COMMERCIAL".to_string()),
        plan: Some("KAISER FOUNDATION HEALTH PLAN, INC.".to_string()),
        gross_charge: Some(11834.0),
        location: Some("San Diego".to_string()),
        ..Default::default()
    };
    let b = ChargeMasterEntry {
        procedure_description: Some("ROOM & BOARD-CCU".to_string()),
        ..a.clone()
    };
    assert_ne!(a, b);
    assert!(a < b);
}

#[test]
fn construction_order_is_irrelevant() {
    let a = ChargeMasterEntry {
        payer: Some("Cash".to_string()),
        gross_charge: Some(10.0),
        ..Default::default()
    };
    let b = ChargeMasterEntry {
        gross_charge: Some(10.0),
        payer: Some("Cash".to_string()),
        ..Default::default()
    };
    assert_eq!(a, b);
}

#[test]
fn unspecified_fields_default_to_absent() {
    let entry = ChargeMasterEntry {
        payer: Some("Cash".to_string()),
        ..Default::default()
    };
    assert!(entry.min_reimbursement.is_none());
    assert!(entry.extra_data.is_none());
    assert!(entry.in_patient.is_none());
}

#[test]
fn serde_omits_absent_fields() {
    let entry = ChargeMasterEntry {
        payer: Some("Cash".to_string()),
        gross_charge: Some(10.0),
        ..Default::default()
    };
    let json = serde_json::to_string(&entry).expect("serialize entry");
    assert_eq!(json, r#"{"gross_charge":10.0,"payer":"Cash"}"#);
    let round: ChargeMasterEntry = serde_json::from_str(&json).expect("deserialize entry");
    assert_eq!(round, entry);
}

fn arb_entry() -> impl Strategy<Value = ChargeMasterEntry> {
    (
        proptest::option::of("[A-Z]{1,4}"),
        proptest::option::of(0u32..5000u32),
        proptest::option::of(0u32..5000u32),
        proptest::option::of(any::<bool>()),
        proptest::option::of("[a-z ]{0,8}"),
    )
        .prop_map(|(code, gross, expected, in_patient, payer)| ChargeMasterEntry {
            cpt_code: code,
            gross_charge: gross.map(f64::from),
            expected_reimbursement: expected.map(f64::from),
            in_patient,
            payer,
            ..Default::default()
        })
}

proptest! {
    /// The order is total and antisymmetric, so sort-then-compare is stable
    /// no matter which permutation a parser emitted.
    #[test]
    fn ordering_is_total_and_consistent(a in arb_entry(), b in arb_entry(), c in arb_entry()) {
        use std::cmp::Ordering;

        match a.cmp(&b) {
            Ordering::Equal => prop_assert_eq!(&a, &b),
            Ordering::Less => prop_assert_eq!(b.cmp(&a), Ordering::Greater),
            Ordering::Greater => prop_assert_eq!(b.cmp(&a), Ordering::Less),
        }

        let mut sorted = vec![a.clone(), b.clone(), c.clone()];
        sorted.sort();
        let mut resorted = sorted.clone();
        resorted.sort();
        prop_assert_eq!(sorted, resorted);
    }
}
