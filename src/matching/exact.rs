// Exact matching: token string equality after normalization.

use super::traits::{MatchHit, EXACT_SIMILARITY};
use crate::text::Token;

/// Positions of every token equal to `keyword`.
///
/// Comparison is case-sensitive; callers pass a keyword that went through
/// the same normalizer as the tokens.
pub fn exact_matches(tokens: &[Token], keyword: &str) -> Vec<usize> {
    tokens
        .iter()
        .filter(|t| t.text == keyword)
        .map(|t| t.position)
        .collect()
}

/// Exact matches as evidence hits (similarity fixed at 100).
pub fn exact_hits(tokens: &[Token], keyword: &str) -> Vec<MatchHit> {
    tokens
        .iter()
        .filter(|t| t.text == keyword)
        .map(|t| MatchHit {
            position: t.position,
            token: t.text.clone(),
            similarity: EXACT_SIMILARITY,
        })
        .collect()
}
