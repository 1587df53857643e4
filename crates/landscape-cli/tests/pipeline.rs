//! End-to-end tests for the collection pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use landscape_cli::pipeline::{Collector, CompletenessReport};
use landscape_feedback::{FeedbackGenerator, SUCCESS_MESSAGE};
use landscape_ingest::IngestOptions;
use landscape_session::Session;

fn write_upload(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write upload");
    path
}

fn collector(data_dir: &Path) -> Collector {
    Collector::new(data_dir, FeedbackGenerator::new())
}

#[test]
fn collecting_the_required_exports_completes_the_session() {
    let uploads = tempfile::tempdir().expect("uploads dir");
    let data_dir = tempfile::tempdir().expect("data dir");
    let files = vec![
        write_upload(
            uploads.path(),
            "system_inventory.csv",
            "SID,host,client\nPRD,sap-prd-01,100\nQAS,sap-qas-01,200\n",
        ),
        write_upload(
            uploads.path(),
            "db_backups.csv",
            "sid,last_backup\nPRD,2025-07-30\nQAS,30.07.2025\n",
        ),
        write_upload(
            uploads.path(),
            "jobs.csv",
            "job,status\nZ_MONTH_END,OK\nZ_CLEANUP,OK\n",
        ),
    ];

    let report = collector(data_dir.path())
        .collect(Some("audit"), &files)
        .expect("collect");

    assert_eq!(report.session_id, "audit");
    assert!(report.all_required_present);
    assert!(!report.has_invalid());
    assert_eq!(report.results.len(), 3);
    for file in report.results.values() {
        assert!(file.valid, "{}: {:?}", file.filename, file.issues);
        assert_eq!(file.feedback, SUCCESS_MESSAGE);
    }

    let session = Session::open(data_dir.path(), "audit").expect("open session");
    assert!(session.dir().join("jobs.csv").is_file());
    let overview = session.overview().expect("overview");
    assert_eq!(overview.systems.len(), 2);
    assert_eq!(overview.collection_files.len(), 3);
}

#[test]
fn invalid_file_reports_issues_and_feedback() {
    let uploads = tempfile::tempdir().expect("uploads dir");
    let data_dir = tempfile::tempdir().expect("data dir");
    let jobs = write_upload(
        uploads.path(),
        "jobs.csv",
        "job,status\nZ_A,FAILED\nZ_B,OK\nZ_C,failed\n",
    );

    let report = collector(data_dir.path())
        .collect(None, &[jobs])
        .expect("collect");

    assert!(!report.all_required_present);
    assert!(report.has_invalid());
    let file = &report.results["jobs.csv"];
    assert!(!file.valid);
    assert_eq!(file.issues, vec!["2 rows indicate job failure status."]);
    assert!(file.feedback.contains("- 2 rows indicate job failure status."));
    assert!(file.feedback.contains("Remediation steps:"));
}

#[test]
fn unparseable_upload_still_gets_an_artifact() {
    let uploads = tempfile::tempdir().expect("uploads dir");
    let data_dir = tempfile::tempdir().expect("data dir");
    let inventory = write_upload(uploads.path(), "system_inventory.csv", "");

    let collector = collector(data_dir.path());
    let outcome = collector
        .validate(Some("broken"), &inventory)
        .expect("validate");

    assert!(!outcome.file.valid);
    assert_eq!(outcome.file.issues.len(), 1);
    assert!(outcome.file.issues[0].starts_with("Parse error: "));

    let session = Session::open(data_dir.path(), "broken").expect("open session");
    assert_eq!(
        session.artifact_names().expect("artifacts"),
        vec!["system_inventory.csv.normalized.json"]
    );
    assert!(session.overview().expect("overview").systems.is_empty());
}

#[test]
fn oversize_limit_is_applied() {
    let uploads = tempfile::tempdir().expect("uploads dir");
    let data_dir = tempfile::tempdir().expect("data dir");
    let jobs = write_upload(uploads.path(), "jobs.csv", "job,status\nZ_A,OK\n");

    let outcome = collector(data_dir.path())
        .with_ingest_options(IngestOptions::default().with_max_file_size(8))
        .validate(None, &jobs)
        .expect("validate");
    assert!(outcome.file.issues[0].contains("file too large"));
}

#[test]
fn completeness_report_lists_missing_artifacts() {
    let uploads = tempfile::tempdir().expect("uploads dir");
    let data_dir = tempfile::tempdir().expect("data dir");
    let inventory = write_upload(uploads.path(), "system_inventory.csv", "sid\nPRD\n");
    let collector = collector(data_dir.path());
    collector
        .collect(Some("partial"), &[inventory])
        .expect("collect");

    let session = Session::open(data_dir.path(), "partial").expect("open session");
    let report = CompletenessReport::for_session(&session);
    assert!(!report.complete);
    assert_eq!(
        report.missing,
        vec!["db_backups.csv.normalized.json", "jobs.csv.normalized.json"]
    );
}

#[test]
fn missing_upload_is_an_error() {
    let data_dir = tempfile::tempdir().expect("data dir");
    let err = collector(data_dir.path())
        .validate(None, Path::new("/nonexistent/landscape/jobs.csv"))
        .expect_err("missing upload");
    assert!(format!("{err:#}").contains("store upload"));
}

#[test]
fn validation_outcome_json_shape() {
    let uploads = tempfile::tempdir().expect("uploads dir");
    let data_dir = tempfile::tempdir().expect("data dir");
    let jobs = write_upload(uploads.path(), "jobs.csv", "job,status\nZ_A,OK\n");

    let outcome = collector(data_dir.path())
        .validate(Some("audit"), &jobs)
        .expect("validate");

    insta::assert_json_snapshot!(outcome, @r#"
    {
      "session_id": "audit",
      "filename": "jobs.csv",
      "valid": true,
      "issues": [],
      "feedback": "No issues detected. File parsed successfully."
    }
    "#);
}
