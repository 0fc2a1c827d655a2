use crate::utils::date::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One audit line; newest entries are kept at the head of the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: String,
    pub action: String,
    pub user: String,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
