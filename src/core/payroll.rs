use crate::core::auth::Actor;
use crate::core::calculator::payday::{PaydayStatus, due_for_payment, payday_status};
use crate::core::calculator::salary::{
    PaymentForm, SalaryTotals, calculate, confirm_payment, suggested_form,
};
use crate::db::backend::StorageBackend;
use crate::db::log::log_action;
use crate::db::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::payment::Payment;
use crate::models::supervisor::Permission;
use crate::models::worker::Worker;
use crate::utils::ids::next_id;
use chrono::{NaiveDate, NaiveDateTime};

/// Caller-supplied values replacing the suggested payment form fields.
#[derive(Debug, Clone, Default)]
pub struct FormOverrides {
    pub overtime_hours: Option<f64>,
    pub bonuses: Option<f64>,
    pub absence_deduction: Option<f64>,
    pub loan_deduction: Option<f64>,
    pub notes: Option<String>,
}

impl FormOverrides {
    /// Suggested form for `worker` with the overrides applied.
    pub fn form_for(&self, worker: &Worker) -> PaymentForm {
        let mut form = suggested_form(worker);
        if let Some(v) = self.overtime_hours {
            form.overtime_hours = v;
        }
        if let Some(v) = self.bonuses {
            form.bonuses = v;
        }
        if let Some(v) = self.absence_deduction {
            form.absence_deduction = v;
        }
        if let Some(v) = self.loan_deduction {
            form.loan_deduction = v;
        }
        if let Some(n) = &self.notes {
            form.notes = n.clone();
        }
        form
    }
}

pub struct PaymentPreview {
    pub worker: Worker,
    pub status: PaydayStatus,
    pub form: PaymentForm,
    pub totals: SalaryTotals,
}

pub struct PayrollLogic;

impl PayrollLogic {
    /// Unpaid workers whose payday is near or passed, by pay day.
    pub fn due<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        today: NaiveDate,
    ) -> AppResult<Vec<(Worker, PaydayStatus)>> {
        actor.require(Permission::ProcessPayments)?;

        let doc = repo.load()?;
        Ok(due_for_payment(&doc.workers, today)
            .into_iter()
            .map(|w| (w.clone(), payday_status(w, today)))
            .collect())
    }

    pub fn preview<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        worker_id: &str,
        overrides: &FormOverrides,
        today: NaiveDate,
    ) -> AppResult<PaymentPreview> {
        actor.require(Permission::ProcessPayments)?;

        let worker = repo.worker(worker_id)?;
        let form = overrides.form_for(&worker);
        let totals = calculate(&worker, &form);
        Ok(PaymentPreview {
            status: payday_status(&worker, today),
            worker,
            form,
            totals,
        })
    }

    /// Pay the salary and write the `PAYMENT` audit line in the same write.
    pub fn confirm<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        worker_id: &str,
        overrides: &FormOverrides,
        now: NaiveDateTime,
    ) -> AppResult<Payment> {
        actor.require(Permission::ProcessPayments)?;

        repo.mutate(|doc| {
            let payment_id = next_id(
                doc.workers
                    .iter()
                    .flat_map(|w| w.payments.iter().map(|p| p.id.as_str())),
            );
            let worker = doc
                .worker_mut(worker_id)
                .ok_or_else(|| AppError::not_found("Worker", worker_id))?;

            let form = overrides.form_for(worker);
            let payment = confirm_payment(worker, &form, payment_id, now);
            let details = format!(
                "Paid salary of {} amounting to {:.2}",
                worker.name, payment.amount
            );

            log_action(doc, now, "PAYMENT", actor.id(), Some(&details));
            Ok(payment)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryStorage;
    use crate::db::repository::DEFAULT_STORAGE_KEY;
    use crate::models::payment::PaymentType;
    use crate::models::supervisor::Supervisor;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 27)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn repo_with_worker() -> Repository<MemoryStorage> {
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let w = Worker {
            id: "1".into(),
            name: "Ali".into(),
            branch: "Jeddah Branch".into(),
            iqama: "111".into(),
            mobile: "055".into(),
            pay_day: 28,
            base_salary: 3000.0,
            housing_allowance: 500.0,
            active_loan: 1000.0,
            absences_this_month: 1,
            overtime_hours: 10.0,
            ..Default::default()
        };
        repo.save_worker(w, now()).unwrap();
        repo
    }

    #[test]
    fn preview_uses_suggested_form() {
        let mut repo = repo_with_worker();
        let p = PayrollLogic::preview(
            &mut repo,
            &Actor::Manager,
            "1",
            &FormOverrides::default(),
            now().date(),
        )
        .unwrap();

        assert_eq!(p.status, PaydayStatus::DueSoon(1));
        assert_eq!(p.form.absence_deduction, 100.0);
        assert_eq!(p.form.loan_deduction, 150.0);
        assert_eq!(p.totals.overtime_pay, 187.5);
        assert_eq!(p.totals.net, 3000.0 + 500.0 + 187.5 - 250.0);
    }

    #[test]
    fn confirm_pays_and_logs() {
        let mut repo = repo_with_worker();
        let overrides = FormOverrides {
            bonuses: Some(200.0),
            loan_deduction: Some(0.0),
            ..Default::default()
        };
        let payment =
            PayrollLogic::confirm(&mut repo, &Actor::Manager, "1", &overrides, now()).unwrap();

        assert_eq!(payment.kind, PaymentType::Salary);
        assert_eq!(payment.details.bonuses, 200.0);

        let w = repo.worker("1").unwrap();
        assert_eq!(w.payments.len(), 1);
        assert_eq!(w.active_loan, 1000.0);
        assert_eq!(w.absences_this_month, 0);
        assert_eq!(w.overtime_hours, 0.0);

        let logs = repo.logs().unwrap();
        assert_eq!(logs[0].action, "PAYMENT");

        let due = PayrollLogic::due(&mut repo, &Actor::Manager, now().date()).unwrap();
        assert!(due.is_empty());
    }

    #[test]
    fn supervisor_needs_payment_permission() {
        let mut repo = repo_with_worker();
        let sup = Supervisor {
            id: "9".into(),
            name: "Sara".into(),
            username: "sara".into(),
            password: "pw".into(),
            approved: true,
            permissions: vec![Permission::ViewReports],
            created_at: now(),
        };
        let res = PayrollLogic::confirm(
            &mut repo,
            &Actor::Supervisor(sup),
            "1",
            &FormOverrides::default(),
            now(),
        );
        assert!(matches!(res, Err(AppError::PermissionDenied(_))));
        assert!(repo.worker("1").unwrap().payments.is_empty());
    }
}
