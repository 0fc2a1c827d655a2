use crate::utils::date::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Supervisor,
    Worker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Supervisor => "supervisor",
            Role::Worker => "worker",
        }
    }
}

/// One side of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Id under which the manager account sends and receives messages.
pub const MANAGER_ID: &str = "manager";

impl Participant {
    pub fn manager() -> Self {
        Self {
            id: MANAGER_ID.to_string(),
            name: "General Management".to_string(),
            role: Role::Manager,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    General,
    Request,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub from_id: String,
    pub from_name: String,
    pub from_role: Role,
    pub to_id: String,
    pub to_name: String,
    pub content: String,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "type", default)]
    pub kind: MessageType,
}

impl Message {
    /// True when the message belongs to the conversation between `a` and `b`.
    pub fn between(&self, a: &str, b: &str) -> bool {
        (self.from_id == a && self.to_id == b) || (self.from_id == b && self.to_id == a)
    }
}
