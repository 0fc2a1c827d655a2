use crate::config::Config;
use crate::core::auth::Actor;
use crate::db::backend::StorageBackend;
use crate::db::repository::{Repository, next_account_id};
use crate::errors::{AppError, AppResult};
use crate::models::notification::{Category, NotificationDraft, Severity};
use crate::models::supervisor::Permission;
use crate::models::worker::Worker;
use crate::ui::messages::success;
use chrono::NaiveDateTime;

/// Field values given on the command line; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct WorkerInput {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub job_title: Option<String>,
    pub iqama: Option<String>,
    pub iqama_expiry_date: Option<String>,
    pub mobile: Option<String>,
    pub password: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub join_date: Option<String>,
    pub pay_day: Option<i32>,
    pub base_salary: Option<f64>,
    pub housing_allowance: Option<f64>,
    pub transport_allowance: Option<f64>,
    pub active_loan: Option<f64>,
    pub absences: Option<u32>,
    pub overtime_hours: Option<f64>,
}

fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *slot = v.clone();
    }
}

impl WorkerInput {
    pub fn apply(&self, w: &mut Worker) {
        set(&mut w.name, &self.name);
        set(&mut w.branch, &self.branch);
        set(&mut w.job_title, &self.job_title);
        set(&mut w.iqama, &self.iqama);
        set(&mut w.iqama_expiry_date, &self.iqama_expiry_date);
        set(&mut w.mobile, &self.mobile);
        set(&mut w.bank_name, &self.bank_name);
        set(&mut w.account_number, &self.account_number);
        set(&mut w.join_date, &self.join_date);
        set(&mut w.pay_day, &self.pay_day);
        set(&mut w.base_salary, &self.base_salary);
        set(&mut w.housing_allowance, &self.housing_allowance);
        set(&mut w.transport_allowance, &self.transport_allowance);
        set(&mut w.active_loan, &self.active_loan);
        set(&mut w.absences_this_month, &self.absences);
        set(&mut w.overtime_hours, &self.overtime_hours);
        if self.password.is_some() {
            w.password = self.password.clone();
        }
    }
}

/// First problem found in a worker record, if any.
pub fn validate(w: &Worker) -> Option<&'static str> {
    if w.name.trim().is_empty() {
        return Some("worker name is required");
    }
    if w.iqama.trim().is_empty() {
        return Some("iqama number is required");
    }
    if w.mobile.trim().is_empty() {
        return Some("mobile number is required");
    }
    if w.branch.trim().is_empty() {
        return Some("branch is required");
    }
    if w.base_salary <= 0.0 {
        return Some("base salary is required");
    }
    if !(1..=30).contains(&w.pay_day) {
        return Some("pay day must be between 1 and 30");
    }
    None
}

pub struct WorkerLogic;

impl WorkerLogic {
    /// A new worker record with configured defaults and the next free id.
    pub fn blank<B: StorageBackend>(
        repo: &mut Repository<B>,
        cfg: &Config,
        now: NaiveDateTime,
    ) -> AppResult<Worker> {
        let doc = repo.load()?;
        Ok(Worker {
            id: next_account_id(&doc),
            branch: doc
                .branches
                .first()
                .map(|b| b.name.clone())
                .unwrap_or_else(|| "Main".to_string()),
            job_title: "Employee".to_string(),
            join_date: now.date().format("%Y-%m-%d").to_string(),
            pay_day: cfg.default_pay_day,
            base_salary: cfg.default_base_salary,
            ..Default::default()
        })
    }

    /// Validate and store a worker, then write the audit line.
    ///
    /// An invalid record raises a warning notification and is not stored.
    pub fn save<B: StorageBackend>(
        repo: &mut Repository<B>,
        cfg: &Config,
        actor: &Actor,
        worker: Worker,
        now: NaiveDateTime,
    ) -> AppResult<bool> {
        actor.require(Permission::ManageWorkers)?;

        if let Some(problem) = validate(&worker) {
            repo.add_notification(
                NotificationDraft::new("Invalid data", format!("Failed to save worker: {problem}"))
                    .severity(Severity::Warning)
                    .category(Category::System),
                now,
            )?;
            return Err(AppError::Validation(problem.to_string()));
        }

        if repo.username_taken(&worker.iqama, Some(&worker.id), &cfg.manager_username)? {
            return Err(AppError::UsernameTaken(worker.iqama));
        }

        let name = worker.name.clone();
        let created = repo.save_worker(worker, now)?;
        let action = if created {
            "CREATE_WORKER"
        } else {
            "UPDATE_WORKER"
        };
        repo.log_action(
            action,
            actor.id(),
            Some(&format!("Worker {name} saved by {}", actor.name())),
            now,
        )?;

        Ok(created)
    }

    pub fn add<B: StorageBackend>(
        repo: &mut Repository<B>,
        cfg: &Config,
        actor: &Actor,
        input: &WorkerInput,
        now: NaiveDateTime,
    ) -> AppResult<Worker> {
        let mut worker = Self::blank(repo, cfg, now)?;
        input.apply(&mut worker);
        let id = worker.id.clone();

        Self::save(repo, cfg, actor, worker, now)?;
        let stored = repo.worker(&id)?;
        success(format!("Worker {} added (id {})", stored.name, stored.id));
        Ok(stored)
    }

    pub fn edit<B: StorageBackend>(
        repo: &mut Repository<B>,
        cfg: &Config,
        actor: &Actor,
        id: &str,
        input: &WorkerInput,
        now: NaiveDateTime,
    ) -> AppResult<Worker> {
        let mut worker = repo.worker(id)?;
        input.apply(&mut worker);

        Self::save(repo, cfg, actor, worker.clone(), now)?;
        success(format!("Worker {} updated", worker.name));
        Ok(worker)
    }

    /// Only the manager removes workers.
    pub fn delete<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        id: &str,
        now: NaiveDateTime,
    ) -> AppResult<Worker> {
        actor.require_manager()?;

        let removed = repo.delete_worker(id)?;
        repo.log_action(
            "DELETE_WORKER",
            actor.id(),
            Some(&format!("Deleted worker {}", removed.name)),
            now,
        )?;
        success(format!("Worker {} deleted", removed.name));
        Ok(removed)
    }
}
