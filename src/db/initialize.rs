use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::repository::{Repository, SqliteRepository};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring the schema up to date. Tables only come from migrations.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}

/// Open the database at `path` and wrap it in a repository over `key`.
pub fn open_repository(path: &str, key: &str) -> AppResult<SqliteRepository> {
    let pool = DbPool::new(path)?;
    init_db(&pool.conn)?;
    Ok(Repository::new(pool, key))
}
