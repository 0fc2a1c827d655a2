//! Login and permission checks.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Document;
use crate::models::message::{MANAGER_ID, Participant, Role};
use crate::models::supervisor::{Permission, Supervisor};
use crate::models::worker::Worker;

/// The authenticated user a command runs as.
#[derive(Debug, Clone)]
pub enum Actor {
    Manager,
    Supervisor(Supervisor),
    Worker(Worker),
}

impl Actor {
    pub fn id(&self) -> &str {
        match self {
            Actor::Manager => MANAGER_ID,
            Actor::Supervisor(s) => &s.id,
            Actor::Worker(w) => &w.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Actor::Manager => "General Management",
            Actor::Supervisor(s) => &s.name,
            Actor::Worker(w) => &w.name,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Actor::Manager => Role::Manager,
            Actor::Supervisor(_) => Role::Supervisor,
            Actor::Worker(_) => Role::Worker,
        }
    }

    pub fn participant(&self) -> Participant {
        match self {
            Actor::Manager => Participant::manager(),
            _ => Participant {
                id: self.id().to_string(),
                name: self.name().to_string(),
                role: self.role(),
            },
        }
    }

    /// The manager may do everything; supervisors need `perm`; workers are
    /// limited to self-service.
    pub fn require(&self, perm: Permission) -> AppResult<()> {
        match self {
            Actor::Manager => Ok(()),
            Actor::Supervisor(s) if s.has(perm) => Ok(()),
            Actor::Supervisor(s) => Err(AppError::PermissionDenied(format!(
                "supervisor '{}' lacks the '{}' permission",
                s.username,
                perm.code()
            ))),
            Actor::Worker(_) => Err(AppError::PermissionDenied(
                "workers can only use self-service commands".into(),
            )),
        }
    }

    pub fn require_manager(&self) -> AppResult<()> {
        match self {
            Actor::Manager => Ok(()),
            _ => Err(AppError::PermissionDenied(
                "only the manager can do this".into(),
            )),
        }
    }

    /// Manager or any approved supervisor.
    pub fn require_staff(&self) -> AppResult<()> {
        match self {
            Actor::Worker(_) => Err(AppError::PermissionDenied(
                "workers can only use self-service commands".into(),
            )),
            _ => Ok(()),
        }
    }

    pub fn require_worker(&self) -> AppResult<&Worker> {
        match self {
            Actor::Worker(w) => Ok(w),
            _ => Err(AppError::PermissionDenied(
                "this command is for worker accounts".into(),
            )),
        }
    }
}

pub struct AuthLogic;

impl AuthLogic {
    /// Resolve credentials in order: manager, supervisors, workers.
    pub fn login(doc: &Document, cfg: &Config, username: &str, password: &str) -> AppResult<Actor> {
        if username == cfg.manager_username && password == cfg.manager_password {
            return Ok(Actor::Manager);
        }

        if let Some(s) = doc
            .supervisors
            .iter()
            .find(|s| s.username == username && s.password == password)
        {
            if !s.approved {
                return Err(AppError::NotApproved(s.username.clone()));
            }
            return Ok(Actor::Supervisor(s.clone()));
        }

        if let Some(w) = doc.workers.iter().find(|w| w.iqama == username)
            && w.login_password() == password
        {
            return Ok(Actor::Worker(w.clone()));
        }

        Err(AppError::InvalidCredentials)
    }
}
