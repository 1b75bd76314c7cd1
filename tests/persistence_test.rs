#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

fn run(db_path: &std::path::Path, args: &[&str]) -> String {
    let output = Command::new(cargo_bin!("worldline-payment-core"))
        .arg("--db-path")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run records the fixture history
    let stdout1 = run(&db_path, &["ingest", "tests/fixtures/webhooks.ndjson"]);
    assert_eq!(stdout1.lines().count(), 5);

    // 2. Replaying the same deliveries adds nothing
    let stdout2 = run(&db_path, &["ingest", "tests/fixtures/webhooks.ndjson"]);
    assert_eq!(stdout1, stdout2);

    // 3. History is readable without ingesting
    let history = run(&db_path, &["history", "000000042"]);
    assert_eq!(history.lines().count(), 4);
    assert!(history.contains("000000042,3066019730_0-R1,REFUNDED,8,9.90,EUR,,,,"));
}

#[test]
fn test_rocksdb_uninstall() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    run(&db_path, &["ingest", "tests/fixtures/webhooks.ndjson"]);
    run(
        &db_path,
        &["config-set", "worldline_connection/connection/api_key", "key"],
    );
    run(&db_path, &["config-set", "general/locale/code", "en_US"]);

    let report = run(&db_path, &["uninstall"]);
    assert!(report.contains("dropped table worldline_payment_transaction"));
    assert!(report.contains("deleted 1 config entries"));

    // Reopening recreates empty tables
    let history = run(&db_path, &["history", "000000042"]);
    assert_eq!(history.lines().count(), 0);
}
