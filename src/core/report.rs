use crate::core::auth::Actor;
use crate::db::backend::StorageBackend;
use crate::db::repository::Repository;
use crate::errors::AppResult;
use crate::export::PaymentExport;
use crate::models::payment::PaymentType;
use crate::models::supervisor::Permission;
use chrono::NaiveDate;

/// Report filters; `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub branch: Option<String>,
    /// Worker id or exact name.
    pub worker: Option<String>,
    pub kind: Option<PaymentType>,
    pub range: Option<(NaiveDate, NaiveDate)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTotals {
    pub count: usize,
    pub amount: f64,
    pub by_type: Vec<(PaymentType, f64)>,
}

pub struct ReportLogic;

impl ReportLogic {
    /// Matching payments of all workers, oldest first.
    pub fn payments<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        filter: &ReportFilter,
    ) -> AppResult<Vec<PaymentExport>> {
        actor.require(Permission::ViewReports)?;

        let doc = repo.load()?;
        let mut payments: Vec<_> = doc
            .workers
            .iter()
            .filter(|w| filter.branch.as_ref().is_none_or(|b| &w.branch == b))
            .filter(|w| {
                filter
                    .worker
                    .as_ref()
                    .is_none_or(|key| &w.id == key || &w.name == key)
            })
            .flat_map(|w| w.payments.iter().map(move |p| (w, p)))
            .filter(|(_, p)| filter.kind.is_none_or(|k| p.kind == k))
            .filter(|(_, p)| {
                filter
                    .range
                    .is_none_or(|(from, to)| (from..=to).contains(&p.date.date()))
            })
            .collect();

        payments.sort_by_key(|(_, p)| p.date);
        Ok(payments
            .into_iter()
            .map(|(w, p)| PaymentExport::new(w, p))
            .collect())
    }

    pub fn totals(rows: &[PaymentExport]) -> ReportTotals {
        let by_type = [PaymentType::Salary, PaymentType::Advance, PaymentType::Bonus]
            .into_iter()
            .map(|k| {
                let sum = rows
                    .iter()
                    .filter(|r| r.kind == k.label())
                    .map(|r| r.amount)
                    .sum();
                (k, sum)
            })
            .collect();

        ReportTotals {
            count: rows.len(),
            amount: rows.iter().map(|r| r.amount).sum(),
            by_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryStorage;
    use crate::db::repository::DEFAULT_STORAGE_KEY;
    use crate::models::payment::{Payment, PaymentDetails};
    use crate::models::worker::Worker;

    fn payment(id: &str, day: u32, amount: f64, kind: PaymentType) -> Payment {
        Payment {
            id: id.into(),
            date: NaiveDate::from_ymd_opt(2025, 6, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            amount,
            kind,
            details: PaymentDetails::default(),
        }
    }

    fn seeded() -> Repository<MemoryStorage> {
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let mut doc = repo.load().unwrap();
        doc.workers.push(Worker {
            id: "1".into(),
            name: "Ali".into(),
            branch: "Jeddah Branch".into(),
            payments: vec![
                payment("1", 20, 3000.0, PaymentType::Salary),
                payment("3", 2, 500.0, PaymentType::Bonus),
            ],
            ..Default::default()
        });
        doc.workers.push(Worker {
            id: "2".into(),
            name: "Omar".into(),
            branch: "Dammam Branch".into(),
            payments: vec![payment("2", 10, 2500.0, PaymentType::Salary)],
            ..Default::default()
        });
        repo.save(&doc).unwrap();
        repo
    }

    #[test]
    fn unfiltered_report_is_sorted_by_date() {
        let mut repo = seeded();
        let rows = ReportLogic::payments(&mut repo, &Actor::Manager, &ReportFilter::default())
            .unwrap();
        let amounts: Vec<f64> = rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![500.0, 2500.0, 3000.0]);

        let t = ReportLogic::totals(&rows);
        assert_eq!(t.count, 3);
        assert_eq!(t.amount, 6000.0);
        assert_eq!(t.by_type[0], (PaymentType::Salary, 5500.0));
        assert_eq!(t.by_type[2], (PaymentType::Bonus, 500.0));
    }

    #[test]
    fn filters_combine() {
        let mut repo = seeded();
        let filter = ReportFilter {
            kind: Some(PaymentType::Salary),
            range: Some((
                NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            )),
            ..Default::default()
        };
        let rows = ReportLogic::payments(&mut repo, &Actor::Manager, &filter).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].worker, "Ali");

        let by_branch = ReportFilter {
            branch: Some("Dammam Branch".into()),
            ..Default::default()
        };
        let rows = ReportLogic::payments(&mut repo, &Actor::Manager, &by_branch).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].worker_id, "2");

        let by_name = ReportFilter {
            worker: Some("Ali".into()),
            ..Default::default()
        };
        assert_eq!(
            ReportLogic::payments(&mut repo, &Actor::Manager, &by_name)
                .unwrap()
                .len(),
            2
        );
    }
}
