use crate::core::auth::Actor;
use crate::core::calculator::payday::{countdown, is_paid_this_month, urgent_payrolls};
use crate::db::backend::StorageBackend;
use crate::db::repository::Repository;
use crate::errors::AppResult;
use crate::models::activity_log::ActivityLog;
use crate::models::payment::Payment;
use crate::models::request::WorkerRequest;
use crate::models::worker::Worker;
use crate::utils::date::same_month;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_workers: usize,
    pub total_loans: f64,
    pub paid_this_month: f64,
    /// Unpaid workers due within three days, soonest first.
    pub urgent: Vec<(Worker, i32)>,
    pub unpaid_workers: usize,
    /// Monthly packages of everyone not yet paid this month.
    pub estimated_remaining: f64,
    pub recent_logs: Vec<ActivityLog>,
}

#[derive(Debug, Clone)]
pub struct WorkerHome {
    pub worker: Worker,
    pub days_to_pay: i32,
    pub recent_payments: Vec<Payment>,
    pub recent_requests: Vec<WorkerRequest>,
}

pub struct DashboardLogic;

impl DashboardLogic {
    pub fn summary<B: StorageBackend>(
        repo: &mut Repository<B>,
        today: NaiveDate,
    ) -> AppResult<DashboardSummary> {
        let doc = repo.load()?;

        let paid_this_month = doc
            .workers
            .iter()
            .flat_map(|w| w.payments.iter())
            .filter(|p| same_month(p.date.date(), today))
            .map(|p| p.amount)
            .sum();

        let unpaid: Vec<&Worker> = doc
            .workers
            .iter()
            .filter(|w| !is_paid_this_month(w, today))
            .collect();

        Ok(DashboardSummary {
            total_workers: doc.workers.len(),
            total_loans: doc.workers.iter().map(|w| w.active_loan).sum(),
            paid_this_month,
            urgent: urgent_payrolls(&doc.workers, today)
                .into_iter()
                .map(|(w, d)| (w.clone(), d))
                .collect(),
            unpaid_workers: unpaid.len(),
            estimated_remaining: unpaid.iter().map(|w| w.monthly_package()).sum(),
            recent_logs: doc.logs.iter().take(5).cloned().collect(),
        })
    }

    /// Self-service view of the logged-in worker, read fresh from storage.
    pub fn worker_home<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        today: NaiveDate,
    ) -> AppResult<WorkerHome> {
        let me = actor.require_worker()?;
        let worker = repo.worker(&me.id)?;

        Ok(WorkerHome {
            days_to_pay: countdown(worker.pay_day, today),
            recent_payments: worker.payments.iter().rev().take(5).cloned().collect(),
            recent_requests: worker.requests.iter().rev().take(3).cloned().collect(),
            worker,
        })
    }
}
