use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{init_db_with_worker, setup_test_db, init_db, sp, temp_out};

#[test]
fn test_backup_reset_restore_json() {
    let db_path = init_db_with_worker("backup_json");
    let file = temp_out("backup_json", "json");

    sp().args(["--db", &db_path, "backup", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    let raw = fs::read_to_string(&file).expect("backup written");
    assert!(raw.contains("\"workers\""));
    assert!(raw.contains("BACKUP_DOWNLOAD"));

    sp().args(["--db", &db_path, "reset", "--yes"])
        .assert()
        .success()
        .stdout(contains("All data deleted."));

    sp().args(["--db", &db_path, "worker", "list"])
        .assert()
        .success()
        .stdout(contains("No workers registered."));

    sp().args(["--db", &db_path, "restore", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Data restored from"));

    sp().args(["--db", &db_path, "worker", "list"])
        .assert()
        .success()
        .stdout(contains("Ali"));

    sp().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("RESTORE").and(contains("BACKUP_DOWNLOAD")));
}

#[test]
fn test_compressed_backup_restores() {
    let db_path = init_db_with_worker("backup_zip");
    let file = temp_out("backup_zip", "json");
    let zip = temp_out("backup_zip", "zip");

    sp().args(["--db", &db_path, "backup", "--file", &file, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(Path::new(&zip).exists());

    let other = setup_test_db("backup_zip_target");
    init_db(&other);

    sp().args(["--db", &other, "restore", "--file", &zip])
        .assert()
        .success();

    sp().args(["--db", &other, "worker", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Ali"));
}

#[test]
fn test_malformed_backup_is_rejected() {
    let db_path = init_db_with_worker("backup_bad");
    let file = temp_out("backup_bad", "json");
    fs::write(&file, r#"{"workers": [], "supervisors": null}"#).expect("write fixture");

    sp().args(["--db", &db_path, "restore", "--file", &file])
        .assert()
        .failure()
        .stderr(contains("Import rejected"));

    // stored data is untouched
    sp().args(["--db", &db_path, "worker", "list"])
        .assert()
        .success()
        .stdout(contains("Ali"));
}

#[test]
fn test_backup_is_manager_only() {
    let db_path = init_db_with_worker("backup_worker");
    let file = temp_out("backup_worker", "json");

    sp().args([
        "--db",
        &db_path,
        "--as",
        "2400000001",
        "--password",
        "0550000000",
        "backup",
        "--file",
        &file,
    ])
    .assert()
    .failure()
    .stderr(contains("only the manager"));

    assert!(!Path::new(&file).exists());
}

#[test]
fn test_log_clear() {
    let db_path = init_db_with_worker("log_clear");

    sp().args(["--db", &db_path, "log", "--clear"])
        .assert()
        .success()
        .stdout(contains("1 entries removed"));

    sp().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Activity log is empty."));
}

#[test]
fn test_db_info_reports_document() {
    let db_path = init_db_with_worker("db_info");

    sp().args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Workers:").and(contains("Integrity check passed")));
}
