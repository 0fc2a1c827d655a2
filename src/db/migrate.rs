use crate::ui::messages::success;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ensure that the `migrations` bookkeeping table exists.
fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS migrations (
            version     TEXT PRIMARY KEY,
            applied_at  TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM migrations WHERE version = ?1 LIMIT 1")?;
    Ok(stmt.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, description: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO migrations (version, applied_at, description) VALUES (?1, ?2, ?3)",
        params![version, Local::now().to_rfc3339(), description],
    )?;
    Ok(())
}

/// Check if `table` has a column named `column`.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the key-value table that holds the persisted document.
fn create_local_storage(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS local_storage (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    )
}

/// Track when each key was last written.
fn add_updated_at(conn: &Connection) -> Result<()> {
    if has_column(conn, "local_storage", "updated_at")? {
        return Ok(());
    }
    conn.execute_batch(
        "ALTER TABLE local_storage ADD COLUMN updated_at TEXT NOT NULL DEFAULT '';",
    )
}

type Step = fn(&Connection) -> Result<()>;

const MIGRATIONS: &[(&str, &str, Step)] = &[
    (
        "20250301_0001_create_local_storage",
        "Created local_storage table",
        create_local_storage,
    ),
    (
        "20250412_0002_add_updated_at",
        "Added updated_at to local_storage",
        add_updated_at,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Returns the versions applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_migrations_table(conn)?;

    let mut applied = Vec::new();
    for (version, description, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        step(conn)?;
        mark_applied(conn, version, description)?;
        success(format!("Migration applied: {version} → {description}"));
        applied.push(*version);
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_applied_once() {
        let conn = Connection::open_in_memory().unwrap();
        let first = run_pending_migrations(&conn).unwrap();
        assert_eq!(first.len(), MIGRATIONS.len());

        let second = run_pending_migrations(&conn).unwrap();
        assert!(second.is_empty());
        assert!(has_column(&conn, "local_storage", "updated_at").unwrap());
    }
}
