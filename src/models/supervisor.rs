use crate::errors::{AppError, AppResult};
use crate::utils::date::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageWorkers,
    ProcessPayments,
    ViewReports,
    ManageBranches,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::ManageWorkers,
        Permission::ProcessPayments,
        Permission::ViewReports,
        Permission::ManageBranches,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Permission::ManageWorkers => "manage_workers",
            Permission::ProcessPayments => "process_payments",
            Permission::ViewReports => "view_reports",
            Permission::ManageBranches => "manage_branches",
        }
    }

    pub fn from_code(code: &str) -> AppResult<Self> {
        Permission::ALL
            .into_iter()
            .find(|p| p.code() == code.to_lowercase())
            .ok_or_else(|| AppError::InvalidPermission(code.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

impl Supervisor {
    pub fn has(&self, perm: Permission) -> bool {
        self.permissions.contains(&perm)
    }
}
