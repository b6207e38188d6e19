// Score report: per-file totals and the evidence behind them.

use serde::{Deserialize, Serialize};

use crate::matching::MatchHit;

/// Hits for one keyword, split by channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordEvidence {
    /// The keyword as the caller supplied it
    pub keyword: String,
    /// The keyword after normalization (what tokens were compared against)
    pub normalized: String,
    pub exact: Vec<MatchHit>,
    pub fuzzy: Vec<MatchHit>,
}

impl KeywordEvidence {
    /// Points this keyword contributes: exact and fuzzy hits are additive.
    pub fn hit_count(&self) -> usize {
        self.exact.len() + self.fuzzy.len()
    }

    pub fn exact_positions(&self) -> Vec<usize> {
        self.exact.iter().map(|h| h.position).collect()
    }
}

/// Result of scoring one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Sum of all hit counts across keywords and both channels
    pub total_score: u32,
    /// Keywords with at least one hit, in keyword input order
    pub evidence: Vec<KeywordEvidence>,
}

impl ScoreReport {
    pub fn evidence_for(&self, keyword: &str) -> Option<&KeywordEvidence> {
        self.evidence.iter().find(|e| e.keyword == keyword)
    }

    /// Keywords that matched, in evidence order.
    pub fn matched_keywords(&self) -> Vec<&str> {
        self.evidence.iter().map(|e| e.keyword.as_str()).collect()
    }
}
