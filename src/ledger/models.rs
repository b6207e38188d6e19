// Ledger models: rows of the verdicts table and aggregate stats.
//
// Kept apart from the queries so the pipeline can build records without
// depending on rusqlite.

use serde::{Deserialize, Serialize};

/// One recorded verdict, keyed by the content it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictRecord {
    /// SHA-256 of the file bytes at scoring time
    pub content_hash: String,
    /// Path of the file after labeling
    pub path: String,
    pub approved: bool,
    pub score: u32,
    /// Hash of the keyword set and thresholds in force
    pub criteria_hash: String,
    pub recorded_at: String,
}

/// Aggregate view of the ledger for `doclabel status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total: u64,
    pub approved: u64,
    pub canceled: u64,
    /// Number of distinct criteria hashes seen
    pub criteria_sets: u64,
    pub last_recorded_at: Option<String>,
}
