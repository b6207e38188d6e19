// SqliteLedger: rusqlite backend implementing the VerdictLedger trait.
//
// The pipeline is single-threaded, so the connection is owned directly;
// every trait method delegates to a free function in queries.rs.

use anyhow::Result;
use rusqlite::Connection;

use super::models::{LedgerStats, VerdictRecord};
use super::traits::VerdictLedger;

pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    /// Wrap an already-opened connection (tables must exist).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// An in-memory ledger, mostly useful in tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::create_tables(&conn)?;
        Ok(Self { conn })
    }
}

impl VerdictLedger for SqliteLedger {
    fn lookup(&self, content_hash: &str) -> Result<Option<VerdictRecord>> {
        super::queries::get_verdict(&self.conn, content_hash)
    }

    fn record(&self, record: &VerdictRecord) -> Result<()> {
        super::queries::upsert_verdict(&self.conn, record)
    }

    fn stats(&self) -> Result<LedgerStats> {
        super::queries::get_stats(&self.conn)
    }

    fn recent(&self, limit: u32) -> Result<Vec<VerdictRecord>> {
        super::queries::get_recent_verdicts(&self.conn, limit)
    }
}
