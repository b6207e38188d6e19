// Ledger trait: backend-agnostic interface for verdict records.
//
// Implementors: SqliteLedger (wraps rusqlite) and NoopLedger for runs with
// --no-ledger or builds without the `sqlite` feature.

use anyhow::Result;

use super::models::{LedgerStats, VerdictRecord};

pub trait VerdictLedger {
    /// Find the verdict recorded for a content hash.
    fn lookup(&self, content_hash: &str) -> Result<Option<VerdictRecord>>;

    /// Save or replace the verdict for a content hash.
    fn record(&self, record: &VerdictRecord) -> Result<()>;

    /// Totals for status display.
    fn stats(&self) -> Result<LedgerStats>;

    /// Most recent records, newest first.
    fn recent(&self, limit: u32) -> Result<Vec<VerdictRecord>>;

    /// Whether records are actually persisted.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Ledger that remembers nothing.
pub struct NoopLedger;

impl VerdictLedger for NoopLedger {
    fn lookup(&self, _content_hash: &str) -> Result<Option<VerdictRecord>> {
        Ok(None)
    }

    fn record(&self, _record: &VerdictRecord) -> Result<()> {
        Ok(())
    }

    fn stats(&self) -> Result<LedgerStats> {
        Ok(LedgerStats::default())
    }

    fn recent(&self, _limit: u32) -> Result<Vec<VerdictRecord>> {
        Ok(Vec::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
