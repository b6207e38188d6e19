// Decision engine: total score against a minimum threshold.
//
// One hit is one point, and a file is approved once it collects
// `min_score` points. A min_score of 0 approves
// every file, including ones with no hits at all.

use serde::{Deserialize, Serialize};

/// Default minimum number of hits for approval.
pub const DEFAULT_MIN_SCORE: u32 = 2;
/// Default fuzzy similarity threshold (0-100).
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 80;

/// Parameters that shape a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOptions {
    /// Inclusive approval threshold on the total score
    pub min_score: u32,
    /// Minimum similarity (0-100) for a fuzzy hit
    pub fuzzy_threshold: u8,
    /// Whether the caller asked for fuzzy matching
    pub use_fuzzy: bool,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            use_fuzzy: false,
        }
    }
}

/// Outcome of classifying one file in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Approved,
    Canceled,
}

impl Verdict {
    pub fn from_score(score: u32, min_score: u32) -> Self {
        if decide(score, min_score) {
            Verdict::Approved
        } else {
            Verdict::Canceled
        }
    }

    pub fn from_approved(approved: bool) -> Self {
        if approved {
            Verdict::Approved
        } else {
            Verdict::Canceled
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved)
    }

    /// Filename marker inserted before the extension.
    pub fn marker(&self) -> &'static str {
        match self {
            Verdict::Approved => "_Approved",
            Verdict::Canceled => "_Canceled",
        }
    }

    /// Upper-case label used in the terminal summary and tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "APPROVED",
            Verdict::Canceled => "CANCELED",
        }
    }

    /// Slovak yes/no used by the `approved_sk` CSV column.
    pub fn as_sk(&self) -> &'static str {
        match self {
            Verdict::Approved => "ano",
            Verdict::Canceled => "nie",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `score >= min_score`.
pub fn decide(score: u32, min_score: u32) -> bool {
    score >= min_score
}
