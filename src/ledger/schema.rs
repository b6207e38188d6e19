// Ledger schema: table creation and migrations.
//
// Same version-table approach as any small SQLite store: `schema_version`
// records which migrations ran, each migration is a closure over the
// connection.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet. Safe to call on every open.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One row per distinct document content
        CREATE TABLE IF NOT EXISTS verdicts (
            content_hash TEXT PRIMARY KEY,     -- SHA-256 of file bytes
            path TEXT NOT NULL,                -- path after labeling
            approved INTEGER NOT NULL,         -- 1 = Approved, 0 = Canceled
            score INTEGER NOT NULL,
            criteria_hash TEXT NOT NULL,       -- keyword set + thresholds
            recorded_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_verdicts_recorded
            ON verdicts(recorded_at);
        ",
    )
    .context("Failed to create ledger tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    // Migration v2: index on criteria_hash for "which files were labeled
    // under these keywords" lookups.
    run_migration(conn, 2, |c| {
        c.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_verdicts_criteria ON verdicts(criteria_hash);",
        )
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    }

    Ok(())
}

/// Highest applied schema version.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}
