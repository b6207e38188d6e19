// Fuzzy matching strategies and backend capability detection.

use tracing::{debug, warn};

use super::traits::{FuzzyMatcher, MatchHit};
use crate::text::Token;

/// Whether a similarity backend was compiled into this build.
///
/// Resolved once at startup and handed to `fuzzy_matcher`, so the decision
/// is never re-checked in the middle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyCapability {
    Available,
    Unavailable,
}

impl FuzzyCapability {
    pub fn detect() -> Self {
        if cfg!(feature = "fuzzy") {
            FuzzyCapability::Available
        } else {
            FuzzyCapability::Unavailable
        }
    }
}

/// No-op matcher used when fuzzy matching is off or has no backend.
pub struct DisabledFuzzy;

impl FuzzyMatcher for DisabledFuzzy {
    fn fuzzy_matches(&self, _tokens: &[Token], _keyword: &str, _threshold: u8) -> Vec<MatchHit> {
        Vec::new()
    }

    fn is_active(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Indel similarity on a 0-100 scale: `2 * LCS / (len_a + len_b) * 100`,
/// where LCS is the longest common subsequence of chars.
///
/// Only insertions and deletions count as edits, so "kwh" against "kw"
/// scores 80. Symmetric, and identical strings (including two empty ones)
/// score exactly 100, so every exact hit is also a fuzzy hit at any
/// threshold.
#[cfg(feature = "fuzzy")]
pub struct IndelMatcher;

#[cfg(feature = "fuzzy")]
impl IndelMatcher {
    pub fn similarity(a: &str, b: &str) -> f64 {
        if a == b {
            return super::traits::EXACT_SIMILARITY;
        }
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return super::traits::EXACT_SIMILARITY;
        }
        2.0 * lcs_len(&a, &b) as f64 / total as f64 * 100.0
    }
}

/// Longest common subsequence length, one DP row at a time.
#[cfg(feature = "fuzzy")]
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(feature = "fuzzy")]
impl FuzzyMatcher for IndelMatcher {
    fn fuzzy_matches(&self, tokens: &[Token], keyword: &str, threshold: u8) -> Vec<MatchHit> {
        let threshold = f64::from(threshold);
        tokens
            .iter()
            .filter_map(|t| {
                let similarity = Self::similarity(&t.text, keyword);
                (similarity >= threshold).then(|| MatchHit {
                    position: t.position,
                    token: t.text.clone(),
                    similarity,
                })
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "indel"
    }
}

/// Pick the fuzzy strategy for a run.
///
/// Asking for fuzzy matching in a build without a backend is not an error:
/// the run continues with exact matching only and says so once.
pub fn fuzzy_matcher(use_fuzzy: bool, capability: FuzzyCapability) -> Box<dyn FuzzyMatcher> {
    match (use_fuzzy, capability) {
        (false, _) => Box::new(DisabledFuzzy),
        (true, FuzzyCapability::Unavailable) => {
            warn!(
                "Fuzzy matching requested but no similarity backend is compiled in; \
                 using exact matching only"
            );
            Box::new(DisabledFuzzy)
        }
        (true, FuzzyCapability::Available) => available_matcher(),
    }
}

#[cfg(feature = "fuzzy")]
fn available_matcher() -> Box<dyn FuzzyMatcher> {
    debug!("Using Indel fuzzy matcher");
    Box::new(IndelMatcher)
}

#[cfg(not(feature = "fuzzy"))]
fn available_matcher() -> Box<dyn FuzzyMatcher> {
    debug!("Fuzzy capability reported without a backend");
    Box::new(DisabledFuzzy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize_document;

    #[test]
    fn disabled_finds_nothing() {
        let tokens = tokenize_document("motor motor motor");
        assert!(DisabledFuzzy.fuzzy_matches(&tokens, "motor", 0).is_empty());
        assert!(!DisabledFuzzy.is_active());
    }

    #[test]
    fn not_requested_means_disabled() {
        let matcher = fuzzy_matcher(false, FuzzyCapability::Available);
        assert!(!matcher.is_active());
    }

    #[test]
    fn unavailable_backend_degrades_silently() {
        let matcher = fuzzy_matcher(true, FuzzyCapability::Unavailable);
        assert!(!matcher.is_active());
        assert_eq!(matcher.name(), "disabled");
    }

    #[cfg(feature = "fuzzy")]
    #[test]
    fn near_misses_pass_the_threshold() {
        let tokens = tokenize_document("motora 150 kW");
        let hits = IndelMatcher.fuzzy_matches(&tokens, "motor", 80);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 0);
        assert!(hits[0].similarity > 80.0 && hits[0].similarity < 100.0);
    }

    #[cfg(feature = "fuzzy")]
    #[test]
    fn similarity_is_symmetric() {
        let ab = IndelMatcher::similarity("spotreba", "spotrebe");
        let ba = IndelMatcher::similarity("spotrebe", "spotreba");
        assert_eq!(ab, ba);
    }

    #[cfg(feature = "fuzzy")]
    #[test]
    fn lcs_counts_subsequence_not_substring() {
        let a: Vec<char> = "kvwh".chars().collect();
        let b: Vec<char> = "kwh".chars().collect();
        assert_eq!(lcs_len(&a, &b), 3);
        assert_eq!(lcs_len(&a, &[]), 0);
    }
}
