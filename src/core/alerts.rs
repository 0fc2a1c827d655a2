use crate::core::calculator::notifications::push_notification;
use crate::core::calculator::payday::payday_alert;
use crate::db::backend::StorageBackend;
use crate::db::repository::Repository;
use crate::errors::AppResult;
use chrono::NaiveDateTime;

pub struct AlertLogic;

impl AlertLogic {
    /// Raise payday reminders for every worker due within the alert window.
    ///
    /// Reminders already raised today are skipped, so repeated scans are
    /// harmless. Returns the ids of the notifications stored.
    pub fn scan<B: StorageBackend>(
        repo: &mut Repository<B>,
        now: NaiveDateTime,
    ) -> AppResult<Vec<String>> {
        let mut doc = repo.load()?;
        let today = now.date();

        let drafts: Vec<_> = doc
            .workers
            .iter()
            .filter_map(|w| payday_alert(w, today))
            .collect();

        let raised: Vec<String> = drafts
            .into_iter()
            .filter_map(|d| push_notification(&mut doc.notifications, d, now))
            .collect();

        if !raised.is_empty() {
            repo.save(&doc)?;
        }
        Ok(raised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryStorage;
    use crate::db::repository::DEFAULT_STORAGE_KEY;
    use crate::models::notification::{Category, Severity};
    use crate::models::worker::Worker;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn seeded() -> Repository<MemoryStorage> {
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let mut doc = repo.load().unwrap();
        for (id, pay_day) in [("1", 28), ("2", 25), ("3", 10)] {
            doc.workers.push(Worker {
                id: id.into(),
                name: format!("Worker {id}"),
                pay_day,
                base_salary: 3000.0,
                ..Default::default()
            });
        }
        repo.save(&doc).unwrap();
        repo
    }

    #[test]
    fn scan_alerts_only_workers_in_window() {
        let mut repo = seeded();
        let raised = AlertLogic::scan(&mut repo, at(25, 8)).unwrap();
        assert_eq!(raised.len(), 2);

        let notes = repo.notifications().unwrap();
        let due_today = notes.iter().find(|n| n.message.contains("Worker 2")).unwrap();
        assert_eq!(due_today.severity, Severity::Success);
        assert_eq!(due_today.category, Category::Payroll);
        assert_eq!(
            due_today.idempotency_id.as_deref(),
            Some("salary-alert-2-5-2025")
        );
    }

    #[test]
    fn rescanning_the_same_day_adds_nothing() {
        let mut repo = seeded();
        AlertLogic::scan(&mut repo, at(25, 8)).unwrap();
        assert!(AlertLogic::scan(&mut repo, at(25, 18)).unwrap().is_empty());
        assert_eq!(repo.notifications().unwrap().len(), 2);

        let next_day = AlertLogic::scan(&mut repo, at(26, 8)).unwrap();
        assert_eq!(next_day.len(), 1);
    }

    #[test]
    fn imported_alert_with_caller_id_is_not_raised_again() {
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        repo.import_json(
            r#"{
                "workers": [{
                    "id": "1", "name": "Ali", "branch": "Jeddah Branch",
                    "iqama": "2400000001", "mobile": "0550000000",
                    "payDay": 25, "baseSalary": 3000
                }],
                "supervisors": [],
                "notifications": [{
                    "id": "salary-alert-1-5-2025",
                    "title": "Payday reminder",
                    "message": "Salary of Ali is due today",
                    "date": "2025-06-25T07:00:00",
                    "type": "success"
                }]
            }"#,
        )
        .unwrap();

        assert!(AlertLogic::scan(&mut repo, at(25, 9)).unwrap().is_empty());
        assert_eq!(repo.notifications().unwrap().len(), 1);
    }
}
