//! Tests for the decode module

use super::*;
use crate::error::Error;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

// ============================================================================
// Body Parsing Tests
// ============================================================================

#[test]
fn test_parse_body_keeps_exact_decimals() {
    let body = parse_body(r#"{"data": [{"cost": 12.10, "big": 0.1000000000000000055511151231257827}]}"#)
        .unwrap();
    let cost = &body["data"][0]["cost"];
    assert_eq!(cost.to_string(), "12.10");
    assert_eq!(
        Decimal::from_str(&cost.to_string()).unwrap(),
        Decimal::new(1210, 2)
    );
    assert_eq!(
        body["data"][0]["big"].to_string(),
        "0.1000000000000000055511151231257827"
    );
}

#[test]
fn test_parse_body_invalid() {
    let err = parse_body("{not json").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// RecordExtractor Tests
// ============================================================================

#[test]
fn test_extractor_path() {
    let extractor = RecordExtractor::new(DEFAULT_RECORDS_PATH).unwrap();
    assert_eq!(extractor.path(), "$.data[*]");
    assert!(format!("{extractor:?}").contains("$.data[*]"));
}

#[test]
fn test_extractor_yields_objects_in_order() {
    let extractor = RecordExtractor::new(DEFAULT_RECORDS_PATH).unwrap();
    let body = parse_body(
        r#"{"data": [{"name": "a", "cost": 1.50}, {"name": "b", "cost": 2}], "next_page": 2}"#,
    )
    .unwrap();

    let records: Vec<_> = extractor.extract(&body).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "a");
    assert_eq!(records[0]["cost"].to_string(), "1.50");
    assert_eq!(records[1]["name"], "b");
}

#[test]
fn test_extractor_missing_path_yields_nothing() {
    let extractor = RecordExtractor::new(DEFAULT_RECORDS_PATH).unwrap();
    assert_eq!(extractor.extract(&json!({"error": null})).count(), 0);
    assert_eq!(extractor.extract(&json!({"object": "list"})).count(), 0);
}

#[test]
fn test_extractor_empty_array() {
    let extractor = RecordExtractor::new(DEFAULT_RECORDS_PATH).unwrap();
    assert_eq!(extractor.extract(&json!({"data": []})).count(), 0);
}

#[test]
fn test_extractor_skips_non_objects() {
    let extractor = RecordExtractor::new(DEFAULT_RECORDS_PATH).unwrap();
    let body = json!({"data": [{"id": 1}, 42, "x", {"id": 2}]});
    let records: Vec<_> = extractor.extract(&body).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[1]["id"], 2);
}

#[test]
fn test_extractor_root_array() {
    let extractor = RecordExtractor::new("$[*]").unwrap();
    let body = json!([{"id": "x"}, {"id": "y"}, {"id": "z"}]);
    assert_eq!(extractor.extract(&body).count(), 3);
}

#[test]
fn test_extractor_nested_wildcards() {
    let extractor = RecordExtractor::new("$.pages[*].rows[*]").unwrap();
    let body = json!({"pages": [{"rows": [{"n": 1}, {"n": 2}]}, {"rows": [{"n": 3}]}]});
    let numbers: Vec<_> = extractor.extract(&body).map(|r| r["n"].clone()).collect();
    assert_eq!(numbers, vec![json!(1), json!(2), json!(3)]);
}

#[test]
fn test_extractor_invalid_path() {
    let err = RecordExtractor::new("$.data[").unwrap_err();
    assert!(matches!(err, Error::JsonPath { .. }), "got {err}");
}
