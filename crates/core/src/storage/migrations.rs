//! Schema versions
//!
//! Applied versions are recorded in `schema_migrations`; each run applies the
//! ones a database has not seen yet.

use rusqlite::Connection;
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};

struct Migration {
    version: u32,
    description: &'static str,
    sql: &'static str,
}

/// Numbered from 1 with no gaps
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Key/value entries for session, bookings and stats",
        sql: r#"
            -- One JSON document per key, mirroring browser local storage
            CREATE TABLE IF NOT EXISTS kv_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: 2,
        description: "Add accounts table for credential checks",
        sql: r#"
            CREATE TABLE IF NOT EXISTS accounts (
                user_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                role TEXT NOT NULL DEFAULT 'user',
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_accounts_role ON accounts(role);
        "#,
    },
];

fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

/// Highest applied version, 0 for a fresh database
pub(crate) fn get_current_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })?;
    Ok(version.unwrap_or(0))
}

/// Apply one migration and record it in a single transaction
fn apply(conn: &Connection, migration: &Migration) -> Result<()> {
    info!(
        version = migration.version,
        description = migration.description,
        "Applying migration"
    );

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.execute(
        "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            migration.version,
            migration.description,
            chrono::Utc::now().to_rfc3339()
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Bring the schema up to date.
///
/// A database stamped with a version this build does not know is refused
/// rather than written to.
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );",
    )?;

    let current = get_current_version(conn)?;
    let latest = latest_version();
    if current > latest {
        return Err(Error::InvalidOperation(format!(
            "Database schema version {} is newer than this build supports ({})",
            current, latest
        )));
    }

    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > current).collect();
    if pending.is_empty() {
        debug!(version = current, "Schema up to date");
        return Ok(());
    }

    for migration in pending {
        apply(conn, migration)?;
    }
    info!(from = current, to = latest, "Database schema updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, u32>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_fresh_database_gets_every_table() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_current_version(&conn).unwrap(), latest_version());
        assert!(table_exists(&conn, "kv_entries"));
        assert!(table_exists(&conn, "accounts"));
    }

    #[test]
    fn test_rerun_applies_nothing() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let applied: u32 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied as usize, MIGRATIONS.len());
    }

    #[test]
    fn test_upgrades_from_first_version() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_migrations (
                version INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                applied_at TEXT NOT NULL
            );",
        )
        .unwrap();
        apply(&conn, &MIGRATIONS[0]).unwrap();
        assert!(!table_exists(&conn, "accounts"));

        run_migrations(&conn).unwrap();
        assert!(table_exists(&conn, "accounts"));
        assert_eq!(get_current_version(&conn).unwrap(), 2);
    }

    #[test]
    fn test_refuses_newer_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn.execute(
            "INSERT INTO schema_migrations (version, description, applied_at) VALUES (99, 'future', '')",
            [],
        )
        .unwrap();

        assert!(matches!(
            run_migrations(&conn),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_versions_are_sequential() {
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, i + 1, "{}", migration.description);
        }
    }
}
