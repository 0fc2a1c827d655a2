use super::{payment::Payment, request::WorkerRequest};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub branch: String,
    #[serde(default)]
    pub job_title: String,
    /// Residence id; doubles as the worker's login name.
    pub iqama: String,
    #[serde(default)]
    pub iqama_expiry_date: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub join_date: String,

    /// Day of the 30-day pay cycle (1..=30).
    pub pay_day: i32,
    pub base_salary: f64,
    #[serde(default)]
    pub housing_allowance: f64,
    #[serde(default)]
    pub transport_allowance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    #[serde(default)]
    pub active_loan: f64,
    #[serde(default)]
    pub absences_this_month: u32,
    #[serde(default)]
    pub overtime_hours: f64,

    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub requests: Vec<WorkerRequest>,
}

impl Worker {
    /// Most recent payment (payments are append-only).
    pub fn last_payment(&self) -> Option<&Payment> {
        self.payments.last()
    }

    /// Login password; falls back to the mobile number when never set.
    pub fn login_password(&self) -> &str {
        self.password.as_deref().unwrap_or(&self.mobile)
    }

    /// Fixed monthly package: base salary plus allowances.
    pub fn monthly_package(&self) -> f64 {
        self.base_salary + self.housing_allowance + self.transport_allowance
    }
}
