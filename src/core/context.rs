use crate::config::Config;
use crate::core::auth::{Actor, AuthLogic};
use crate::db::initialize::open_repository;
use crate::db::repository::SqliteRepository;
use crate::errors::AppResult;
use crate::utils::date;
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Everything a command handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub cfg: Config,
    pub today: NaiveDate,
    pub now: NaiveDateTime,
    username: Option<String>,
    password: Option<String>,
}

impl AppContext {
    /// `today` simulates the current date; the wall-clock time is kept.
    pub fn new(
        cfg: Config,
        today: Option<NaiveDate>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        let now = match today {
            Some(d) => d.and_time(Local::now().time()),
            None => date::now(),
        };
        Self {
            cfg,
            today: now.date(),
            now,
            username,
            password,
        }
    }

    /// Open the configured database, applying pending schema migrations.
    pub fn open_repo(&self) -> AppResult<SqliteRepository> {
        open_repository(&self.cfg.database, &self.cfg.storage_key)
    }

    /// Without `--as` commands run as the manager.
    pub fn login(&self, repo: &mut SqliteRepository) -> AppResult<Actor> {
        match &self.username {
            None => Ok(Actor::Manager),
            Some(user) => {
                let doc = repo.load()?;
                AuthLogic::login(
                    &doc,
                    &self.cfg,
                    user,
                    self.password.as_deref().unwrap_or_default(),
                )
            }
        }
    }

    /// Open the repository and authenticate in one step.
    pub fn session(&self) -> AppResult<(SqliteRepository, Actor)> {
        let mut repo = self.open_repo()?;
        let actor = self.login(&mut repo)?;
        Ok((repo, actor))
    }
}
