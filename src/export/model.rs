// src/export/model.rs

use crate::models::payment::Payment;
use crate::models::worker::Worker;
use crate::utils::date::format_timestamp;
use serde::Serialize;

/// Flat report row: one payment with the worker it belongs to.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PaymentExport {
    pub date: String,
    pub worker_id: String,
    pub worker: String,
    pub branch: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub base_salary: f64,
    pub allowances: f64,
    pub overtime: f64,
    pub bonuses: f64,
    pub deductions: f64,
    pub notes: String,
}

impl PaymentExport {
    pub fn new(worker: &Worker, p: &Payment) -> Self {
        let d = &p.details;
        Self {
            date: format_timestamp(&p.date),
            worker_id: worker.id.clone(),
            worker: worker.name.clone(),
            branch: worker.branch.clone(),
            kind: p.kind.label().to_string(),
            amount: p.amount,
            base_salary: d.base_salary,
            allowances: d.housing + d.transport,
            overtime: d.overtime,
            bonuses: d.bonuses,
            deductions: d.absences_deduction + d.loan_deduction,
            notes: d.notes.clone().unwrap_or_default(),
        }
    }
}

/// Columns written as numbers in spreadsheets.
pub(crate) const MONEY_HEADERS: [&str; 6] = [
    "amount",
    "base_salary",
    "allowances",
    "overtime",
    "bonuses",
    "deductions",
];

/// Header for CSV / XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "date",
        "worker_id",
        "worker",
        "branch",
        "type",
        "amount",
        "base_salary",
        "allowances",
        "overtime",
        "bonuses",
        "deductions",
        "notes",
    ]
}

/// Row values in header order.
pub(crate) fn payment_to_row(e: &PaymentExport) -> Vec<String> {
    vec![
        e.date.clone(),
        e.worker_id.clone(),
        e.worker.clone(),
        e.branch.clone(),
        e.kind.clone(),
        format!("{:.2}", e.amount),
        format!("{:.2}", e.base_salary),
        format!("{:.2}", e.allowances),
        format!("{:.2}", e.overtime),
        format!("{:.2}", e.bonuses),
        format!("{:.2}", e.deductions),
        e.notes.clone(),
    ]
}
