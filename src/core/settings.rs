use crate::core::auth::Actor;
use crate::db::backend::StorageBackend;
use crate::db::repository::{AccountKind, DocumentStats, Repository};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;

pub struct SettingsLogic;

impl SettingsLogic {
    /// The manager sets a new password for a worker or supervisor.
    pub fn reset_password<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        kind: AccountKind,
        id: &str,
        new_password: &str,
        now: NaiveDateTime,
    ) -> AppResult<()> {
        actor.require_manager()?;
        if new_password.is_empty() {
            return Err(AppError::Validation("password must not be empty".into()));
        }

        repo.update_password(id, kind, new_password)?;
        let label = match kind {
            AccountKind::Worker => "worker",
            AccountKind::Supervisor => "supervisor",
        };
        repo.log_action(
            "PASSWORD_RESET",
            actor.id(),
            Some(&format!("Reset password for {label} ID: {id}")),
            now,
        )
    }

    /// Drop every stored record.
    pub fn system_reset<B: StorageBackend>(repo: &mut Repository<B>, actor: &Actor) -> AppResult<()> {
        actor.require_manager()?;
        repo.reset()
    }

    pub fn stats<B: StorageBackend>(repo: &mut Repository<B>) -> AppResult<DocumentStats> {
        repo.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::auth::AuthLogic;
    use crate::db::backend::MemoryStorage;
    use crate::db::repository::DEFAULT_STORAGE_KEY;
    use crate::models::worker::Worker;
    use chrono::NaiveDate;

    #[test]
    fn reset_password_changes_worker_login() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let w = Worker {
            id: "1".into(),
            name: "Ali".into(),
            iqama: "111".into(),
            mobile: "055".into(),
            ..Default::default()
        };
        repo.save_worker(w, now).unwrap();

        SettingsLogic::reset_password(&mut repo, &Actor::Manager, AccountKind::Worker, "1", "s3cret", now)
            .unwrap();

        let doc = repo.load().unwrap();
        let cfg = Config::default();
        assert!(AuthLogic::login(&doc, &cfg, "111", "055").is_err());
        assert!(AuthLogic::login(&doc, &cfg, "111", "s3cret").is_ok());
        assert_eq!(doc.logs[0].action, "PASSWORD_RESET");
    }
}
