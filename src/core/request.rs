use crate::core::auth::Actor;
use crate::core::calculator::notifications::push_notification;
use crate::db::backend::StorageBackend;
use crate::db::log::log_action;
use crate::db::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::notification::{Category, NotificationDraft};
use crate::models::request::{RequestStatus, RequestType, WorkerRequest};
use crate::models::supervisor::Permission;
use crate::models::worker::Worker;
use crate::utils::ids::next_id;
use chrono::NaiveDateTime;

pub struct RequestLogic;

impl RequestLogic {
    /// A worker files a request for the management.
    pub fn submit<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        kind: RequestType,
        amount: Option<f64>,
        reason: &str,
        now: NaiveDateTime,
    ) -> AppResult<WorkerRequest> {
        let me = actor.require_worker()?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation("a reason is required".into()));
        }
        if amount.is_some_and(|a| a <= 0.0) {
            return Err(AppError::Validation("amount must be positive".into()));
        }

        repo.mutate(|doc| {
            let worker = doc
                .worker_mut(&me.id)
                .ok_or_else(|| AppError::not_found("Worker", me.id.as_str()))?;

            let request = WorkerRequest {
                id: next_id(worker.requests.iter().map(|r| r.id.as_str())),
                kind,
                status: RequestStatus::Pending,
                date: now,
                amount,
                reason: reason.to_string(),
            };
            worker.requests.push(request.clone());
            let message = format!("Worker {} filed a {} request", worker.name, kind.code());

            push_notification(
                &mut doc.notifications,
                NotificationDraft::new("New request", message)
                    .category(Category::Loan)
                    .target("dashboard"),
                now,
            );
            Ok(request)
        })
    }

    /// Pending requests of every worker, oldest first.
    pub fn pending<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
    ) -> AppResult<Vec<(Worker, WorkerRequest)>> {
        actor.require(Permission::ManageWorkers)?;

        let doc = repo.load()?;
        let mut out: Vec<(Worker, WorkerRequest)> = doc
            .workers
            .iter()
            .flat_map(|w| {
                w.requests
                    .iter()
                    .filter(|r| r.status == RequestStatus::Pending)
                    .map(move |r| (w.clone(), r.clone()))
            })
            .collect();
        out.sort_by_key(|(_, r)| r.date);
        Ok(out)
    }

    /// Approve or reject. An approved loan is added to the worker's balance.
    pub fn review<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        worker_id: &str,
        request_id: &str,
        approve: bool,
        now: NaiveDateTime,
    ) -> AppResult<WorkerRequest> {
        actor.require_manager()?;

        repo.mutate(|doc| {
            let worker = doc
                .worker_mut(worker_id)
                .ok_or_else(|| AppError::not_found("Worker", worker_id))?;
            let request = worker
                .requests
                .iter_mut()
                .find(|r| r.id == request_id)
                .ok_or_else(|| AppError::not_found("Request", request_id))?;

            if request.status != RequestStatus::Pending {
                return Err(AppError::Validation(format!(
                    "request {request_id} is already {}",
                    request.status.label()
                )));
            }

            request.status = if approve {
                RequestStatus::Approved
            } else {
                RequestStatus::Rejected
            };
            let reviewed = request.clone();

            if approve
                && reviewed.kind == RequestType::Loan
                && let Some(amount) = reviewed.amount
            {
                worker.active_loan += amount;
            }

            let details = format!(
                "{} {} request {} of {}",
                if approve { "Approved" } else { "Rejected" },
                reviewed.kind.code(),
                reviewed.id,
                worker.name
            );
            log_action(doc, now, "REQUEST_REVIEW", actor.id(), Some(&details));
            Ok(reviewed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryStorage;
    use crate::db::repository::DEFAULT_STORAGE_KEY;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn seeded() -> (Repository<MemoryStorage>, Actor) {
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let w = Worker {
            id: "1".into(),
            name: "Ali".into(),
            iqama: "111".into(),
            mobile: "055".into(),
            active_loan: 100.0,
            ..Default::default()
        };
        repo.save_worker(w.clone(), now()).unwrap();
        (repo, Actor::Worker(w))
    }

    #[test]
    fn approved_loan_increases_balance() {
        let (mut repo, ali) = seeded();
        let req = RequestLogic::submit(
            &mut repo,
            &ali,
            RequestType::Loan,
            Some(500.0),
            "car repair",
            now(),
        )
        .unwrap();
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(repo.notifications().unwrap()[0].category, Category::Loan);

        let pending = RequestLogic::pending(&mut repo, &Actor::Manager).unwrap();
        assert_eq!(pending.len(), 1);

        RequestLogic::review(&mut repo, &Actor::Manager, "1", &req.id, true, now()).unwrap();
        assert_eq!(repo.worker("1").unwrap().active_loan, 600.0);

        let again = RequestLogic::review(&mut repo, &Actor::Manager, "1", &req.id, true, now());
        assert!(matches!(again, Err(AppError::Validation(_))));
        assert_eq!(repo.worker("1").unwrap().active_loan, 600.0);
    }

    #[test]
    fn rejected_request_keeps_balance() {
        let (mut repo, ali) = seeded();
        let req = RequestLogic::submit(
            &mut repo,
            &ali,
            RequestType::Loan,
            Some(500.0),
            "car repair",
            now(),
        )
        .unwrap();
        let r = RequestLogic::review(&mut repo, &Actor::Manager, "1", &req.id, false, now())
            .unwrap();
        assert_eq!(r.status, RequestStatus::Rejected);
        assert_eq!(repo.worker("1").unwrap().active_loan, 100.0);
    }

    #[test]
    fn reason_is_required() {
        let (mut repo, ali) = seeded();
        let res = RequestLogic::submit(&mut repo, &ali, RequestType::Vacation, None, "  ", now());
        assert!(matches!(res, Err(AppError::Validation(_))));
        assert!(repo.worker("1").unwrap().requests.is_empty());
    }
}
