//! Journal list parsing against `tests/fixtures/journals/J_Medline_sample.txt`

mod common;

use common::fixture;
use medkb_core::journals::{parse_file, write_json, JournalRecord};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_fixture() {
    let records = parse_file(&fixture("journals/J_Medline_sample.txt")).unwrap();

    let summary: Vec<(&str, &str)> = records
        .iter()
        .map(|r| (r.abbr.as_str(), r.issn.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("AADE Ed J", "0160-6999"),
            ("AANA J", "0094-6354"),
            ("AAOHN J", "2162-5247"),
            ("Rev Med Chil", "0034-9887"),
            ("Z Kinderheilkd", "0044-2917"),
        ]
    );
    assert_eq!(records[3].title, "Revista médica de Chile");
    assert!(records.iter().all(|r| JournalRecord::is_valid_issn(&r.issn)));
}

#[test]
fn test_write_json_round_trip() {
    let records = parse_file(&fixture("journals/J_Medline_sample.txt")).unwrap();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("journals.json");

    write_json(&path, &records).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();

    // Non-ASCII stays literal and the array is indented
    assert!(content.contains("Revista médica de Chile"));
    assert!(content.starts_with("[\n  {\n    \"title\""));

    let reread: Vec<JournalRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(reread, records);
}

#[test]
fn test_parse_is_deterministic() {
    let path = fixture("journals/J_Medline_sample.txt");
    assert_eq!(parse_file(&path).unwrap(), parse_file(&path).unwrap());
}

#[test]
fn test_missing_file_is_error() {
    assert!(parse_file(&fixture("journals/absent.txt")).is_err());
}
