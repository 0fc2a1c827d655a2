//! The persisted document: every collection of the application in one blob.

use super::activity_log::ActivityLog;
use super::branch::{Branch, default_branches};
use super::message::Message;
use super::notification::Notification;
use super::supervisor::Supervisor;
use super::worker::Worker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub logs: Vec<ActivityLog>,
    #[serde(default)]
    pub supervisors: Vec<Supervisor>,
    #[serde(default = "default_branches")]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            workers: Vec::new(),
            messages: Vec::new(),
            logs: Vec::new(),
            supervisors: Vec::new(),
            branches: default_branches(),
            notifications: Vec::new(),
        }
    }
}

impl Document {
    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    pub fn worker_mut(&mut self, id: &str) -> Option<&mut Worker> {
        self.workers.iter_mut().find(|w| w.id == id)
    }

    pub fn supervisor(&self, id: &str) -> Option<&Supervisor> {
        self.supervisors.iter().find(|s| s.id == id)
    }

    pub fn supervisor_mut(&mut self, id: &str) -> Option<&mut Supervisor> {
        self.supervisors.iter_mut().find(|s| s.id == id)
    }
}
