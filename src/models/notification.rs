use crate::utils::date::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Success => "success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Payroll,
    Loan,
    Message,
    Announcement,
    #[default]
    System,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Payroll => "payroll",
            Category::Loan => "loan",
            Category::Message => "message",
            Category::Announcement => "announcement",
            Category::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "type", default)]
    pub severity: Severity,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_id: Option<String>,
}

/// A notification that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub category: Category,
    pub target_page: Option<String>,
    pub idempotency_id: Option<String>,
}

impl NotificationDraft {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::default(),
            category: Category::default(),
            target_page: None,
            idempotency_id: None,
        }
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn target(mut self, page: impl Into<String>) -> Self {
        self.target_page = Some(page.into());
        self
    }

    pub fn idempotent(mut self, id: impl Into<String>) -> Self {
        self.idempotency_id = Some(id.into());
        self
    }

    /// Materialize the draft with a storage id and creation time.
    pub fn into_notification(self, id: String, created: NaiveDateTime) -> Notification {
        Notification {
            id,
            title: self.title,
            message: self.message,
            date: created,
            read: false,
            severity: self.severity,
            category: self.category,
            target_page: self.target_page,
            idempotency_id: self.idempotency_id,
        }
    }
}
