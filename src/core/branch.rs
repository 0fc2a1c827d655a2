use crate::core::auth::Actor;
use crate::db::backend::StorageBackend;
use crate::db::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::branch::Branch;
use crate::models::supervisor::Permission;

pub struct BranchLogic;

impl BranchLogic {
    pub fn add<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        name: &str,
        location: Option<&str>,
    ) -> AppResult<Branch> {
        actor.require(Permission::ManageBranches)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("branch name is required".into()));
        }
        if repo.branches()?.iter().any(|b| b.name == name) {
            return Err(AppError::Validation(format!("branch '{name}' already exists")));
        }
        repo.add_branch(name, location)
    }

    /// Workers keep the branch name they were saved with.
    pub fn delete<B: StorageBackend>(
        repo: &mut Repository<B>,
        actor: &Actor,
        id: &str,
    ) -> AppResult<Branch> {
        actor.require(Permission::ManageBranches)?;
        repo.delete_branch(id)
    }

    /// Branches with their current head count.
    pub fn with_head_count<B: StorageBackend>(
        repo: &mut Repository<B>,
    ) -> AppResult<Vec<(Branch, usize)>> {
        let doc = repo.load()?;
        Ok(doc
            .branches
            .iter()
            .map(|b| {
                let count = doc.workers.iter().filter(|w| w.branch == b.name).count();
                (b.clone(), count)
            })
            .collect())
    }
}
