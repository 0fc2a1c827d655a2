use crate::errors::{AppError, AppResult};
use crate::utils::date::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestType {
    Loan,
    Vacation,
    Certificate,
}

impl RequestType {
    pub fn code(&self) -> &'static str {
        match self {
            RequestType::Loan => "LOAN",
            RequestType::Vacation => "VACATION",
            RequestType::Certificate => "CERTIFICATE",
        }
    }

    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.to_uppercase().as_str() {
            "LOAN" => Ok(RequestType::Loan),
            "VACATION" => Ok(RequestType::Vacation),
            "CERTIFICATE" => Ok(RequestType::Certificate),
            _ => Err(AppError::InvalidRequestType(code.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RequestType,
    pub status: RequestStatus,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub reason: String,
}
