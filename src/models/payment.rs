use crate::errors::{AppError, AppResult};
use crate::utils::date::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    Salary,
    Advance,
    Bonus,
}

impl PaymentType {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentType::Salary => "SALARY",
            PaymentType::Advance => "ADVANCE",
            PaymentType::Bonus => "BONUS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Salary => "Salary",
            PaymentType::Advance => "Advance",
            PaymentType::Bonus => "Bonus",
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.to_uppercase().as_str() {
            "SALARY" => Ok(PaymentType::Salary),
            "ADVANCE" => Ok(PaymentType::Advance),
            "BONUS" => Ok(PaymentType::Bonus),
            _ => Err(AppError::InvalidPaymentType(code.to_string())),
        }
    }
}

/// Breakdown of one disbursement, frozen at confirmation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub base_salary: f64,
    pub housing: f64,
    pub transport: f64,
    pub overtime: f64,
    pub bonuses: f64,
    pub absences_deduction: f64,
    pub loan_deduction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: PaymentType,
    pub details: PaymentDetails,
}
