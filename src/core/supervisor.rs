use crate::core::auth::Actor;
use crate::db::backend::StorageBackend;
use crate::db::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::supervisor::{Permission, Supervisor};
use chrono::NaiveDateTime;

/// How `supervisor perm` changes a permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionChange {
    Grant,
    Revoke,
    Toggle,
}

pub fn apply_change(current: &[Permission], perm: Permission, change: PermissionChange) -> Vec<Permission> {
    let has = current.contains(&perm);
    let keep = match change {
        PermissionChange::Grant => true,
        PermissionChange::Revoke => false,
        PermissionChange::Toggle => !has,
    };

    let mut out: Vec<Permission> = current.iter().copied().filter(|p| *p != perm).collect();
    if keep {
        out.push(perm);
    }
    out
}

pub struct SupervisorLogic;

impl SupervisorLogic {
    /// Self-registration; no login needed.
    pub fn register<B: StorageBackend>(
        repo: &mut Repository<B>,
        manager_username: &str,
        name: &str,
        username: &str,
        password: &str,
        now: NaiveDateTime,
    ) -> AppResult<Supervisor> {
        if name.trim().is_empty() || username.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "name, username and password are required".into(),
            ));
        }
        repo.register_supervisor(name.trim(), username.trim(), password, manager_username, now)
    }

    pub fn set_approval<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        id: &str,
        approved: bool,
        now: NaiveDateTime,
    ) -> AppResult<Supervisor> {
        actor.require_manager()?;

        let s = repo.set_supervisor_approval(id, approved)?;
        let verb = if approved { "Approved" } else { "Suspended" };
        repo.log_action(
            "USER_MGMT",
            actor.id(),
            Some(&format!("{verb} supervisor {id}")),
            now,
        )?;
        Ok(s)
    }

    pub fn change_permission<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        id: &str,
        perm: Permission,
        change: PermissionChange,
        now: NaiveDateTime,
    ) -> AppResult<Supervisor> {
        actor.require_manager()?;

        let current = repo
            .supervisors()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found("Supervisor", id))?;
        let updated = apply_change(&current.permissions, perm, change);
        let s = repo.update_supervisor_permissions(id, updated)?;

        let listed: Vec<&str> = s.permissions.iter().map(|p| p.code()).collect();
        repo.log_action(
            "USER_MGMT",
            actor.id(),
            Some(&format!(
                "Permissions of supervisor {id} set to [{}]",
                listed.join(", ")
            )),
            now,
        )?;
        Ok(s)
    }

    pub fn delete<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        id: &str,
        now: NaiveDateTime,
    ) -> AppResult<Supervisor> {
        actor.require_manager()?;

        let s = repo.delete_supervisor(id)?;
        repo.log_action(
            "USER_MGMT",
            actor.id(),
            Some(&format!("Deleted supervisor {}", s.username)),
            now,
        )?;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::backend::MemoryStorage;
    use crate::db::repository::DEFAULT_STORAGE_KEY;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn toggle_flips_membership() {
        let p = Permission::ViewReports;
        let granted = apply_change(&[], p, PermissionChange::Toggle);
        assert_eq!(granted, vec![p]);
        assert!(apply_change(&granted, p, PermissionChange::Toggle).is_empty());
        assert_eq!(apply_change(&granted, p, PermissionChange::Grant), vec![p]);
        assert!(apply_change(&granted, p, PermissionChange::Revoke).is_empty());
    }

    #[test]
    fn approval_is_manager_only_and_logged() {
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let s = SupervisorLogic::register(&mut repo, "2298305398", "Sara", "sara", "pw", now())
            .unwrap();

        let other = Actor::Supervisor(s.clone());
        assert!(SupervisorLogic::set_approval(&mut repo, &other, &s.id, true, now()).is_err());

        let approved =
            SupervisorLogic::set_approval(&mut repo, &Actor::Manager, &s.id, true, now()).unwrap();
        assert!(approved.approved);
        let logs = repo.logs().unwrap();
        assert_eq!(logs[0].action, "USER_MGMT");
        assert_eq!(logs[0].details.as_deref(), Some("Approved supervisor 1"));
    }

    #[test]
    fn registration_requires_all_fields() {
        let mut repo = Repository::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
        let res = SupervisorLogic::register(&mut repo, "2298305398", "", "sara", "pw", now());
        assert!(matches!(res, Err(AppError::Validation(_))));
        assert!(repo.supervisors().unwrap().is_empty());
    }
}
