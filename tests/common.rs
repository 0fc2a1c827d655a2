#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const TODAY: &str = "2025-06-27";

pub fn sp() -> Command {
    cargo_bin_cmd!("samipro")
}

/// Command bound to a test database and a fixed current date.
pub fn sp_at(db_path: &str, today: &str) -> Command {
    let mut cmd = sp();
    cmd.args(["--db", db_path, "--today", today]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_samipro.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB without touching the user's config file
pub fn init_db(db_path: &str) {
    sp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add a worker through the CLI; extra flags are appended as given
pub fn add_worker(db_path: &str, name: &str, iqama: &str, extra: &[&str]) {
    let mut args = vec![
        "--db", db_path, "worker", "add", "--name", name, "--iqama", iqama, "--mobile",
        "0550000000",
    ];
    args.extend_from_slice(extra);
    sp().args(&args).assert().success();
}

/// Fresh DB with one worker (id 1) paid on the 28th with 10h overtime
pub fn init_db_with_worker(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db(&db_path);
    add_worker(
        &db_path,
        "Ali",
        "2400000001",
        &["--salary", "3000", "--pay-day", "28", "--overtime", "10"],
    );
    db_path
}
