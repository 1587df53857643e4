//! Session lifecycle over a scratch data directory.

use std::fs;

use landscape_model::{CellValue, Issue, ParseResult, Record, REQUIRED_ARTIFACTS};
use landscape_session::{Session, SessionError, is_complete};

fn inventory() -> Vec<Record> {
    vec![
        [
            ("SID", CellValue::text("PRD")),
            ("host", CellValue::text("sap-prd-01")),
            ("client", CellValue::Number(100.0)),
        ]
        .into_iter()
        .collect(),
        [
            ("SID", CellValue::text("QAS")),
            ("host", CellValue::Empty),
            ("client", CellValue::Number(200.0)),
        ]
        .into_iter()
        .collect(),
    ]
}

#[test]
fn artifacts_round_trip_into_overview() {
    let data_dir = tempfile::tempdir().expect("tempdir");
    let session = Session::create(data_dir.path(), Some("landscape-audit")).expect("create");

    let result = ParseResult::new(inventory(), Vec::new());
    let path = session
        .write_artifact("system_inventory.csv", &result)
        .expect("write artifact");
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("system_inventory.csv.normalized.json")
    );

    let text = fs::read_to_string(&path).expect("read artifact");
    assert!(text.starts_with("[\n  {\n    \"SID\": \"PRD\""));
    assert!(text.contains("\"client\": 100"));
    assert!(text.contains("\"host\": \"\""));

    let reopened = Session::open(data_dir.path(), "landscape-audit").expect("open");
    let overview = reopened.overview().expect("overview");
    assert_eq!(overview.session_id, "landscape-audit");
    assert_eq!(overview.systems, inventory());
    assert_eq!(
        overview.collection_files,
        vec!["system_inventory.csv.normalized.json"]
    );
}

#[test]
fn overview_without_inventory_has_no_systems() {
    let data_dir = tempfile::tempdir().expect("tempdir");
    let session = Session::create(data_dir.path(), None).expect("create");
    session
        .write_artifact("jobs.csv", &ParseResult::new(Vec::new(), Vec::new()))
        .expect("write artifact");
    let overview = session.overview().expect("overview");
    assert!(overview.systems.is_empty());
    assert_eq!(overview.collection_files, vec!["jobs.csv.normalized.json"]);
}

#[test]
fn failed_parse_still_writes_an_empty_artifact() {
    let data_dir = tempfile::tempdir().expect("tempdir");
    let session = Session::create(data_dir.path(), None).expect("create");
    let failed = ParseResult::parse_failure("no columns to parse from file jobs.csv");
    assert_eq!(failed.issues().len(), 1);
    assert!(matches!(failed.issues()[0], Issue::ParseError { .. }));

    let path = session.write_artifact("jobs.csv", &failed).expect("write");
    assert_eq!(fs::read_to_string(path).expect("read"), "[]");
}

#[test]
fn status_lists_sorted_artifacts_only() {
    let data_dir = tempfile::tempdir().expect("tempdir");
    let session = Session::create(data_dir.path(), Some("s-1")).expect("create");
    let upload = data_dir.path().join("jobs.csv");
    fs::write(&upload, b"job,status\nZ_A,OK\n").expect("write upload");
    let stored = session.store_upload(&upload).expect("store upload");
    assert_eq!(stored, session.dir().join("jobs.csv"));

    let empty = ParseResult::new(Vec::new(), Vec::new());
    for name in ["jobs.csv", "db_backups.csv", "rfc_dest.csv"] {
        session.write_artifact(name, &empty).expect("write");
    }
    let status = session.status().expect("status");
    assert_eq!(status.session_id, "s-1");
    assert_eq!(
        status.files,
        vec![
            "db_backups.csv.normalized.json",
            "jobs.csv.normalized.json",
            "rfc_dest.csv.normalized.json",
        ]
    );
    assert!(!session.is_complete());
    assert_eq!(
        session.missing_required(),
        vec!["system_inventory.csv.normalized.json"]
    );
}

#[test]
fn completeness_follows_written_artifacts() {
    let data_dir = tempfile::tempdir().expect("tempdir");
    let session = Session::create(data_dir.path(), None).expect("create");
    let empty = ParseResult::new(Vec::new(), Vec::new());
    for name in ["system_inventory.csv", "db_backups.csv", "jobs.csv"] {
        assert!(!is_complete(session.dir()));
        session.write_artifact(name, &empty).expect("write");
    }
    assert!(is_complete(session.dir()));
    assert_eq!(session.artifact_names().expect("names").len(), REQUIRED_ARTIFACTS.len());
}

#[test]
fn artifact_names_must_be_plain_filenames() {
    let data_dir = tempfile::tempdir().expect("tempdir");
    let session = Session::create(data_dir.path(), None).expect("create");
    let err = session
        .write_artifact("../escape.csv", &ParseResult::new(Vec::new(), Vec::new()))
        .expect_err("path traversal");
    assert!(matches!(err, SessionError::InvalidFilename { .. }));
}
