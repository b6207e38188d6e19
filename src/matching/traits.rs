// Fuzzy matcher trait: the swap-ready similarity abstraction.
//
// The default implementation scores tokens with the Indel ratio (longest
// common subsequence over both lengths). A build without the `fuzzy` feature only has the no-op
// implementation, and the rest of the pipeline does not notice.

use serde::{Deserialize, Serialize};

use crate::text::Token;

/// Similarity reported for an exact hit, and for identical strings.
pub const EXACT_SIMILARITY: f64 = 100.0;

/// One token that matched a keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchHit {
    /// Ordinal of the token in the document's token sequence
    pub position: usize,
    /// The normalized token text that matched
    pub token: String,
    /// 100 for exact hits, otherwise the 0-100 similarity ratio
    pub similarity: f64,
}

/// Finds tokens that approximately equal a keyword.
pub trait FuzzyMatcher {
    /// Return every token whose similarity to `keyword` is at least
    /// `threshold` (0-100), in token order. Both sides are expected to be
    /// normalized already.
    fn fuzzy_matches(&self, tokens: &[Token], keyword: &str, threshold: u8) -> Vec<MatchHit>;

    /// Whether this matcher can produce hits at all.
    fn is_active(&self) -> bool {
        true
    }

    /// Short backend name for logs and reports.
    fn name(&self) -> &'static str;
}
