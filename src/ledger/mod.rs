// Verdict ledger: sidecar record of what was decided, under which criteria.
//
// The file name only says Approved or Canceled. The ledger adds the content
// hash the verdict was computed from, the score, a hash of the keyword set
// and thresholds, and a timestamp, so a later run can tell that a label was
// produced under different criteria.
//
// The SQLite backend uses rusqlite with the "bundled" feature so there's no
// system SQLite dependency. The file lives next to the documents as
// `.doclabel.db` unless DOCLABEL_LEDGER_PATH points elsewhere.

pub mod models;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod queries;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use models::{LedgerStats, VerdictRecord};
pub use traits::{NoopLedger, VerdictLedger};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteLedger;

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::scoring::ScoringOptions;
use crate::text::normalize;

/// Ledger file name used when no explicit path is configured.
pub const LEDGER_FILE_NAME: &str = ".doclabel.db";

/// Hex SHA-256 of a file's raw bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Hex SHA-256 identifying the criteria a verdict was produced under.
///
/// Keywords are normalized, de-duplicated and sorted first, so keyword
/// order and spelling variants that fold to the same string do not change
/// the hash. The fuzzy threshold only counts when the fuzzy channel was
/// actually active.
pub fn criteria_hash(keywords: &[String], options: &ScoringOptions, fuzzy_active: bool) -> String {
    let mut folded: Vec<String> = keywords
        .iter()
        .map(|k| normalize(k.trim()))
        .filter(|k| !k.is_empty())
        .collect();
    folded.sort();
    folded.dedup();

    let mut hasher = Sha256::new();
    for keyword in &folded {
        hasher.update(keyword.as_bytes());
        hasher.update(b"\n");
    }
    hasher.update(format!("min_score={}", options.min_score).as_bytes());
    if fuzzy_active {
        hasher.update(format!(";fuzzy_threshold={}", options.fuzzy_threshold).as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Default ledger location for a run rooted at `root`: inside the directory,
/// or next to the file when the root is a single file.
pub fn default_ledger_path(root: &Path) -> PathBuf {
    if root.is_dir() {
        root.join(LEDGER_FILE_NAME)
    } else {
        root.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.join(LEDGER_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(LEDGER_FILE_NAME))
    }
}

#[cfg(feature = "sqlite")]
mod connection {
    use anyhow::{Context, Result};
    use rusqlite::Connection;
    use std::path::Path;

    /// Open (or create) the ledger database and run migrations.
    pub fn initialize(db_path: &Path) -> Result<Connection> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory for ledger: {}", db_path.display())
                })?;
            }
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open ledger at {}", db_path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        super::schema::create_tables(&conn)?;

        Ok(conn)
    }

    /// Open an existing ledger (fails if it doesn't exist yet).
    pub fn open(db_path: &Path) -> Result<Connection> {
        if !db_path.exists() {
            anyhow::bail!(
                "Ledger not found at {}. Run `doclabel label` on that directory first.",
                db_path.display()
            );
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open ledger at {}", db_path.display()))?;
        super::schema::create_tables(&conn)?;

        Ok(conn)
    }
}

#[cfg(feature = "sqlite")]
pub use connection::{initialize, open};
