// Oracle trait: swap-ready abstraction over whatever classifies chunks.
//
// The shipped implementation pipes chunks through an external command
// (CommandOracle). Tests use in-process fakes.

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

/// Parsed oracle verdict for one chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleAnswer {
    pub answer: Answer,
    /// Short quotes or parameter names the oracle based its answer on
    pub evidence: Vec<String>,
    /// 0.0 to 1.0
    pub confidence: f64,
}

impl OracleAnswer {
    /// The fail-closed answer: "no", no evidence, zero confidence.
    pub fn negative() -> Self {
        Self {
            answer: Answer::No,
            evidence: Vec::new(),
            confidence: 0.0,
        }
    }

    pub fn is_positive(&self, min_confidence: f64) -> bool {
        self.answer == Answer::Yes && self.confidence >= min_confidence
    }
}

/// Something that can judge a chunk of text.
pub trait ClassificationOracle {
    /// Send one chunk and return the raw response text.
    fn ask(&self, chunk: &str) -> Result<String>;

    /// Short name for logs.
    fn name(&self) -> &str;
}
