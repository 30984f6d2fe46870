use super::loader::{parse_timestamp, parse_value};
use super::types::RawNumber;
use super::{load_transactions, parse_batch, LoadMode, TransactionType};
use crate::error::ClusterError;
use std::fs;
use tempfile::tempdir;

fn text(s: &str) -> RawNumber {
    RawNumber::Text(s.to_string())
}

#[test]
fn test_classify_input() {
    assert_eq!(TransactionType::classify(None), TransactionType::Transfer);
    assert_eq!(TransactionType::classify(Some("0x")), TransactionType::Transfer);
    assert_eq!(TransactionType::classify(Some("")), TransactionType::Transfer);
    assert_eq!(
        TransactionType::classify(Some("0xa9059cbb")),
        TransactionType::ContractCall
    );
    assert_eq!(TransactionType::default(), TransactionType::Unknown);
}

#[test]
fn test_parse_batch_preserves_order_and_types() {
    let doc = r#"[
        {"from": "0xa", "to": "0xb", "value": "10.5", "timestamp": "1700000000"},
        {"from": "0xc", "to": "0xd", "value": 0, "timestamp": 42, "input": "0x"},
        {"from": "0xe", "to": "0xf", "value": "0x10", "timestamp": "0x2a", "input": "0xdeadbeef"},
        {"from": "0x1", "to": "0x2", "value": "1e3", "timestamp": "7", "input": null}
    ]"#;

    let batch = parse_batch(doc, LoadMode::Strict).unwrap();
    assert_eq!(batch.records.len(), 4);
    assert_eq!(batch.skipped, 0);

    let r = &batch.records;
    assert_eq!(r[0].from.as_str(), "0xa");
    assert_eq!(r[0].value, 10.5);
    assert_eq!(r[0].timestamp, 1_700_000_000);
    assert_eq!(r[0].tx_type, TransactionType::Transfer);

    assert_eq!(r[1].value, 0.0);
    assert_eq!(r[1].timestamp, 42);
    assert_eq!(r[1].tx_type, TransactionType::Transfer);

    assert_eq!(r[2].value, 16.0);
    assert_eq!(r[2].timestamp, 42);
    assert_eq!(r[2].tx_type, TransactionType::ContractCall);

    assert_eq!(r[3].value, 1000.0);
    assert_eq!(r[3].tx_type, TransactionType::Transfer);

    let contract_calls = r
        .iter()
        .filter(|tx| tx.tx_type == TransactionType::ContractCall)
        .count();
    assert_eq!(contract_calls, 1);
}

#[test]
fn test_numeric_field_rejections() {
    assert!(parse_value(&text("abc")).is_err());
    assert!(parse_value(&text("-1")).is_err());
    assert!(parse_value(&text("inf")).is_err());
    assert!(parse_value(&text("NaN")).is_err());
    assert!(parse_value(&text("0xzz")).is_err());

    assert!(parse_timestamp(&text("12.5")).is_err());
    assert!(parse_timestamp(&text("-3")).is_err());
    assert!(parse_timestamp(&RawNumber::Number(serde_json::Number::from(-3i64))).is_err());
    assert_eq!(parse_timestamp(&text(" 99 ")), Ok(99));
}

#[test]
fn test_strict_mode_fails_batch() {
    let doc = r#"[
        {"from": "0xa", "to": "0xb", "value": "1", "timestamp": "1"},
        {"from": "0xa", "to": "0xb", "value": "oops", "timestamp": "1"}
    ]"#;

    match parse_batch(doc, LoadMode::Strict) {
        Err(ClusterError::Parse { index, field, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(field, "value");
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_field_is_parse_error() {
    let doc = r#"[{"from": "0xa", "value": "1", "timestamp": "1"}]"#;
    let err = parse_batch(doc, LoadMode::Strict).unwrap_err();
    assert_eq!(err.kind(), "parse");
    assert!(err.to_string().contains("to"));
}

#[test]
fn test_lenient_mode_skips_bad_entries() {
    let doc = r#"[
        {"from": "0xa", "to": "0xb", "value": "1", "timestamp": "1"},
        {"from": "0xa", "to": "0xb", "value": "1", "timestamp": "yesterday"},
        "not an object",
        {"from": "0xc", "to": "0xd", "value": "2", "timestamp": "2"}
    ]"#;

    let batch = parse_batch(doc, LoadMode::Lenient).unwrap();
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.skipped, 2);
    assert_eq!(batch.records[1].value, 2.0);
}

#[test]
fn test_lenient_mode_skips_out_of_range_number() {
    let doc = r#"[
        {"from": "0xa", "to": "0xb", "value": 1e400, "timestamp": "1"},
        {"from": "0xc", "to": "0xd", "value": "5", "timestamp": "2"}
    ]"#;

    let batch = parse_batch(doc, LoadMode::Lenient).unwrap();
    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.skipped, 1);
    assert_eq!(batch.records[0].value, 5.0);

    match parse_batch(doc, LoadMode::Strict) {
        Err(ClusterError::Parse { index, .. }) => assert_eq!(index, 0),
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_negative_zero_value_normalized() {
    let value = parse_value(&text("-0")).unwrap();
    assert_eq!(value, 0.0);
    assert!(value.is_sign_positive());
}

#[test]
fn test_non_array_document_is_fatal_in_both_modes() {
    let doc = r#"{"from": "0xa"}"#;
    assert!(matches!(
        parse_batch(doc, LoadMode::Strict),
        Err(ClusterError::MalformedBatch(_))
    ));
    assert!(matches!(
        parse_batch(doc, LoadMode::Lenient),
        Err(ClusterError::MalformedBatch(_))
    ));
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tx.json");
    fs::write(
        &path,
        r#"[{"from": "0xa", "to": "0xb", "value": "3", "timestamp": "100001"}]"#,
    )
    .unwrap();

    let batch = load_transactions(&path, LoadMode::Strict).unwrap();
    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].timestamp, 100_001);
}

#[test]
fn test_load_missing_file_is_load_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does-not-exist.json");

    match load_transactions(&path, LoadMode::Strict) {
        Err(ClusterError::Load { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected Load error, got {:?}", other),
    }
}
