//! Salary computation for one payroll event.

use crate::models::payment::{Payment, PaymentDetails, PaymentType};
use crate::models::worker::Worker;
use chrono::NaiveDateTime;

pub const DAYS_PER_MONTH: f64 = 30.0;
pub const HOURS_PER_DAY: f64 = 8.0;
pub const OVERTIME_MULTIPLIER: f64 = 1.5;

/// Share of the outstanding loan suggested as this month's installment.
pub const LOAN_INSTALLMENT_RATE: f64 = 0.15;

/// Editable payroll inputs for one worker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentForm {
    pub overtime_hours: f64,
    pub bonuses: f64,
    pub absence_deduction: f64,
    pub loan_deduction: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalaryTotals {
    pub earnings: f64,
    pub deductions: f64,
    pub net: f64,
    pub overtime_pay: f64,
}

pub fn daily_rate(base_salary: f64) -> f64 {
    base_salary / DAYS_PER_MONTH
}

pub fn hourly_rate(base_salary: f64) -> f64 {
    daily_rate(base_salary) / HOURS_PER_DAY
}

pub fn overtime_pay(base_salary: f64, overtime_hours: f64) -> f64 {
    overtime_hours * hourly_rate(base_salary) * OVERTIME_MULTIPLIER
}

/// Pre-filled form: absence and loan deductions are suggestions only.
pub fn suggested_form(worker: &Worker) -> PaymentForm {
    let absence = (worker.absences_this_month as f64 * daily_rate(worker.base_salary)).round();
    let loan = if worker.active_loan > 0.0 {
        (worker.active_loan * LOAN_INSTALLMENT_RATE).round()
    } else {
        0.0
    };

    PaymentForm {
        overtime_hours: worker.overtime_hours,
        bonuses: 0.0,
        absence_deduction: absence,
        loan_deduction: loan,
        notes: String::new(),
    }
}

/// Net may be negative; no floor is applied.
pub fn calculate(worker: &Worker, form: &PaymentForm) -> SalaryTotals {
    let overtime_pay = overtime_pay(worker.base_salary, form.overtime_hours);
    let earnings = worker.base_salary
        + worker.housing_allowance
        + worker.transport_allowance
        + overtime_pay
        + form.bonuses;
    let deductions = form.absence_deduction + form.loan_deduction;

    SalaryTotals {
        earnings,
        deductions,
        net: earnings - deductions,
        overtime_pay,
    }
}

/// Record the salary payment and apply the payroll side effects:
/// the loan shrinks by the deduction (never below zero) and the monthly
/// absence and overtime counters are cleared.
pub fn confirm_payment(
    worker: &mut Worker,
    form: &PaymentForm,
    payment_id: String,
    at: NaiveDateTime,
) -> Payment {
    let totals = calculate(worker, form);
    let notes = form.notes.trim();

    let payment = Payment {
        id: payment_id,
        date: at,
        amount: totals.net,
        kind: PaymentType::Salary,
        details: PaymentDetails {
            base_salary: worker.base_salary,
            housing: worker.housing_allowance,
            transport: worker.transport_allowance,
            overtime: totals.overtime_pay,
            bonuses: form.bonuses,
            absences_deduction: form.absence_deduction,
            loan_deduction: form.loan_deduction,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        },
    };

    worker.payments.push(payment.clone());
    worker.active_loan = (worker.active_loan - form.loan_deduction).max(0.0);
    worker.absences_this_month = 0;
    worker.overtime_hours = 0.0;

    payment
}
