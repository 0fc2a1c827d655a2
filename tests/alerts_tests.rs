use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_worker, sp, sp_at};

#[test]
fn test_scan_is_idempotent_within_a_day() {
    let db_path = init_db_with_worker("alerts_same_day");

    sp_at(&db_path, "2025-06-26")
        .arg("alerts")
        .assert()
        .success()
        .stdout(contains("1 payday reminder(s) raised"));

    sp_at(&db_path, "2025-06-26")
        .arg("alerts")
        .assert()
        .success()
        .stdout(contains("No new payday reminders."));

    // a new day raises the reminder again
    sp_at(&db_path, "2025-06-27")
        .arg("alerts")
        .assert()
        .success()
        .stdout(contains("1 payday reminder(s) raised"));

    sp().args(["--db", &db_path, "notify", "list"])
        .assert()
        .success()
        .stdout(contains("Ali's salary is due in 2 days").and(contains("Ali's salary is due in 1 days")));
}

#[test]
fn test_no_reminder_outside_window() {
    let db_path = init_db_with_worker("alerts_window");

    sp_at(&db_path, "2025-06-10")
        .arg("alerts")
        .assert()
        .success()
        .stdout(contains("No new payday reminders."));
}

#[test]
fn test_paid_worker_gets_no_reminder() {
    let db_path = init_db_with_worker("alerts_paid");

    sp_at(&db_path, "2025-06-26")
        .args(["pay", "confirm", "1"])
        .assert()
        .success();

    sp_at(&db_path, "2025-06-26")
        .arg("alerts")
        .assert()
        .success()
        .stdout(contains("No new payday reminders."));
}

#[test]
fn test_due_today_reminder() {
    let db_path = init_db_with_worker("alerts_today");

    sp_at(&db_path, "2025-06-28")
        .arg("alerts")
        .assert()
        .success();

    sp().args(["--db", &db_path, "notify", "list", "--unread"])
        .assert()
        .success()
        .stdout(contains("Ali's salary is due today!"));

    sp().args(["--db", &db_path, "notify", "read"])
        .assert()
        .success();

    sp().args(["--db", &db_path, "notify", "list", "--unread"])
        .assert()
        .success()
        .stdout(contains("No notifications."));
}
