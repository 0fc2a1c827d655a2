//! Payday scheduling over a fixed 30-day pay cycle.
//!
//! The cycle length is always 30 days regardless of the real month length.
//! This is a known approximation of the calendar and is kept on purpose:
//! stored pay days and alert ids depend on it.

use crate::models::notification::{Category, NotificationDraft, Severity};
use crate::models::worker::Worker;
use crate::utils::date::same_month;
use chrono::{Datelike, NaiveDate};

pub const CYCLE_DAYS: i32 = 30;

/// Raw differences below this value are read as "payday is early in the next
/// cycle" and wrapped forward by one cycle.
pub const WRAP_THRESHOLD: i32 = -25;

/// Days-remaining window (inclusive) in which a payday is urgent.
pub const ALERT_WINDOW_DAYS: i32 = 3;

/// Raw differences up to this value put a worker on the payment hub list.
pub const HUB_WINDOW_DAYS: i32 = 5;

/// `payDay - today` with no wrap-around.
pub fn raw_diff(pay_day: i32, today: NaiveDate) -> i32 {
    pay_day - today.day() as i32
}

/// Days until the next payday using the wrap threshold heuristic.
///
/// Negative results mean this cycle's payday has already passed.
pub fn days_until_payday(pay_day: i32, today: NaiveDate) -> i32 {
    let diff = raw_diff(pay_day, today);
    if diff < WRAP_THRESHOLD {
        diff + CYCLE_DAYS
    } else {
        diff
    }
}

/// Worker-facing countdown: always wraps a passed payday into the next cycle.
pub fn countdown(pay_day: i32, today: NaiveDate) -> i32 {
    let day = today.day() as i32;
    pay_day - day + if day > pay_day { CYCLE_DAYS } else { 0 }
}

/// True when the worker's most recent payment falls in today's month.
pub fn is_paid_this_month(worker: &Worker, today: NaiveDate) -> bool {
    worker
        .last_payment()
        .is_some_and(|p| same_month(p.date.date(), today))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaydayStatus {
    AlreadyPaid,
    DueToday,
    DueSoon(i32),
    Overdue(i32),
    Upcoming(i32),
}

impl PaydayStatus {
    pub fn describe(&self) -> String {
        match self {
            PaydayStatus::AlreadyPaid => "paid this month".to_string(),
            PaydayStatus::DueToday => "due today".to_string(),
            PaydayStatus::DueSoon(n) | PaydayStatus::Upcoming(n) => format!("due in {n} days"),
            PaydayStatus::Overdue(n) => format!("late {n} days"),
        }
    }
}

pub fn payday_status(worker: &Worker, today: NaiveDate) -> PaydayStatus {
    if is_paid_this_month(worker, today) {
        return PaydayStatus::AlreadyPaid;
    }

    match days_until_payday(worker.pay_day, today) {
        0 => PaydayStatus::DueToday,
        d if (1..=ALERT_WINDOW_DAYS).contains(&d) => PaydayStatus::DueSoon(d),
        d if d < 0 => PaydayStatus::Overdue(-d),
        d => PaydayStatus::Upcoming(d),
    }
}

/// Alert id: one payday reminder per worker and calendar month.
pub fn alert_id(worker_id: &str, today: NaiveDate) -> String {
    format!(
        "salary-alert-{}-{}-{}",
        worker_id,
        today.month0(),
        today.year()
    )
}

/// Reminder for an unpaid worker whose payday is 0..=3 days away.
pub fn payday_alert(worker: &Worker, today: NaiveDate) -> Option<NotificationDraft> {
    let (message, severity) = match payday_status(worker, today) {
        PaydayStatus::DueToday => (
            format!("{}'s salary is due today!", worker.name),
            Severity::Success,
        ),
        PaydayStatus::DueSoon(n) => (
            format!("{}'s salary is due in {} days", worker.name, n),
            Severity::Warning,
        ),
        _ => return None,
    };

    Some(
        NotificationDraft::new("Payday reminder", message)
            .severity(severity)
            .category(Category::Payroll)
            .target("payment-hub")
            .idempotent(alert_id(&worker.id, today)),
    )
}

/// Payment hub list: unpaid workers whose raw difference is at most five days
/// (overdue ones included), ordered by pay day.
pub fn due_for_payment<'a>(workers: &'a [Worker], today: NaiveDate) -> Vec<&'a Worker> {
    let mut due: Vec<&Worker> = workers
        .iter()
        .filter(|w| !is_paid_this_month(w, today))
        .filter(|w| raw_diff(w.pay_day, today) <= HUB_WINDOW_DAYS)
        .collect();
    due.sort_by_key(|w| w.pay_day);
    due
}

/// Dashboard banner: unpaid workers due within the alert window, soonest first.
pub fn urgent_payrolls<'a>(workers: &'a [Worker], today: NaiveDate) -> Vec<(&'a Worker, i32)> {
    let mut urgent: Vec<(&Worker, i32)> = workers
        .iter()
        .filter_map(|w| match payday_status(w, today) {
            PaydayStatus::DueToday => Some((w, 0)),
            PaydayStatus::DueSoon(n) => Some((w, n)),
            _ => None,
        })
        .collect();
    urgent.sort_by_key(|(_, d)| *d);
    urgent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payment::{Payment, PaymentDetails, PaymentType};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn worker(id: &str, pay_day: i32) -> Worker {
        Worker {
            id: id.to_string(),
            name: format!("Worker {id}"),
            pay_day,
            base_salary: 3000.0,
            ..Default::default()
        }
    }

    fn paid_on(mut w: Worker, date: NaiveDate) -> Worker {
        w.payments.push(Payment {
            id: "1".into(),
            date: date.and_hms_opt(9, 0, 0).unwrap(),
            amount: 3000.0,
            kind: PaymentType::Salary,
            details: PaymentDetails::default(),
        });
        w
    }

    #[test]
    fn wraps_early_payday_near_month_end() {
        let today = day(2025, 3, 29);
        assert_eq!(raw_diff(1, today), -28);
        assert_eq!(days_until_payday(1, today), 2);
    }

    #[test]
    fn keeps_threshold_heuristic_for_recently_passed_payday() {
        let today = day(2025, 3, 20);
        assert_eq!(days_until_payday(10, today), -10);
        assert_eq!(days_until_payday(25, today), 5);
    }

    #[test]
    fn countdown_stays_within_one_cycle() {
        for pay_day in 1..=30 {
            for d in 1..=30 {
                let c = countdown(pay_day, day(2025, 1, d));
                assert!((0..CYCLE_DAYS).contains(&c), "payDay={pay_day} today={d} -> {c}");
            }
        }
        assert_eq!(countdown(1, day(2025, 1, 29)), 2);
    }

    #[test]
    fn raw_diff_range_for_valid_inputs() {
        for pay_day in 1..=30 {
            for d in 1..=30 {
                let diff = raw_diff(pay_day, day(2025, 1, d));
                assert!((-29..30).contains(&diff));
                let adjusted = days_until_payday(pay_day, day(2025, 1, d));
                assert!((WRAP_THRESHOLD..CYCLE_DAYS).contains(&adjusted));
            }
        }
    }

    #[test]
    fn out_of_range_pay_day_is_accepted() {
        assert_eq!(days_until_payday(45, day(2025, 1, 10)), 35);
        assert_eq!(days_until_payday(0, day(2025, 1, 31)), -1);
    }

    #[test]
    fn due_today_and_due_soon_have_distinct_severity() {
        let today = day(2025, 6, 10);
        let due_today = payday_alert(&worker("1", 10), today).unwrap();
        assert_eq!(due_today.severity, Severity::Success);
        assert!(due_today.message.contains("due today"));

        let soon = payday_alert(&worker("2", 13), today).unwrap();
        assert_eq!(soon.severity, Severity::Warning);
        assert!(soon.message.contains("due in 3 days"));
        assert_eq!(soon.idempotency_id.as_deref(), Some("salary-alert-2-5-2025"));

        assert!(payday_alert(&worker("3", 14), today).is_none());
        assert!(payday_alert(&worker("4", 9), today).is_none());
    }

    #[test]
    fn paid_this_month_suppresses_alerts_for_every_pay_day() {
        let today = day(2025, 6, 10);
        for pay_day in 1..=30 {
            let w = paid_on(worker("1", pay_day), day(2025, 6, 2));
            assert_eq!(payday_status(&w, today), PaydayStatus::AlreadyPaid);
            assert!(payday_alert(&w, today).is_none());
        }
    }

    #[test]
    fn payment_in_same_month_of_other_year_does_not_count() {
        let w = paid_on(worker("1", 10), day(2024, 6, 2));
        assert!(!is_paid_this_month(&w, day(2025, 6, 10)));
        assert_eq!(payday_status(&w, day(2025, 6, 10)), PaydayStatus::DueToday);
    }

    #[test]
    fn hub_list_is_sorted_by_pay_day() {
        let today = day(2025, 6, 10);
        let workers = vec![
            worker("1", 15),
            worker("2", 2),
            worker("3", 20),
            paid_on(worker("4", 1), day(2025, 6, 1)),
        ];
        let ids: Vec<&str> = due_for_payment(&workers, today)
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn urgent_list_is_sorted_by_days_left() {
        let today = day(2025, 6, 28);
        let workers = vec![worker("1", 30), worker("2", 28), worker("3", 1)];
        let urgent: Vec<(&str, i32)> = urgent_payrolls(&workers, today)
            .into_iter()
            .map(|(w, d)| (w.id.as_str(), d))
            .collect();
        assert_eq!(urgent, vec![("2", 0), ("1", 2), ("3", 3)]);
    }
}
