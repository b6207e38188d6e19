// Scorer: run every keyword through both match channels and add up hits.
//
// Exact and fuzzy hits are summed independently. An exact hit is also a
// fuzzy hit (similarity 100), so with fuzzy matching on, a verbatim keyword
// counts twice.

use tracing::debug;

use super::report::{KeywordEvidence, ScoreReport};
use crate::matching::{exact_hits, fuzzy_matcher, FuzzyCapability, FuzzyMatcher};
use crate::text::{normalize, tokenize_document, Token};

/// Keyword scorer holding the fuzzy strategy resolved for this run.
pub struct Scorer {
    fuzzy: Box<dyn FuzzyMatcher>,
    fuzzy_threshold: u8,
}

impl Scorer {
    /// Build a scorer, resolving the fuzzy backend once.
    pub fn new(use_fuzzy: bool, fuzzy_threshold: u8) -> Self {
        Self::with_matcher(
            fuzzy_matcher(use_fuzzy, FuzzyCapability::detect()),
            fuzzy_threshold,
        )
    }

    /// Build a scorer around an explicit fuzzy strategy.
    pub fn with_matcher(fuzzy: Box<dyn FuzzyMatcher>, fuzzy_threshold: u8) -> Self {
        Self {
            fuzzy,
            fuzzy_threshold,
        }
    }

    /// Whether the fuzzy channel can contribute hits.
    pub fn fuzzy_active(&self) -> bool {
        self.fuzzy.is_active()
    }

    pub fn fuzzy_threshold(&self) -> u8 {
        self.fuzzy_threshold
    }

    /// Score a token sequence against a keyword set.
    ///
    /// Keywords that normalize to nothing (pure punctuation) are skipped.
    /// Keywords with no hits are left out of the evidence.
    pub fn score(&self, tokens: &[Token], keywords: &[String]) -> ScoreReport {
        let mut report = ScoreReport::default();

        for keyword in keywords {
            let normalized = normalize(keyword.trim());
            if normalized.is_empty() {
                debug!(keyword = %keyword, "Keyword normalizes to nothing, skipping");
                continue;
            }

            let exact = exact_hits(tokens, &normalized);
            let fuzzy = self
                .fuzzy
                .fuzzy_matches(tokens, &normalized, self.fuzzy_threshold);

            if exact.is_empty() && fuzzy.is_empty() {
                continue;
            }

            let evidence = KeywordEvidence {
                keyword: keyword.clone(),
                normalized,
                exact,
                fuzzy,
            };
            report.total_score += evidence.hit_count() as u32;
            report.evidence.push(evidence);
        }

        report
    }

    /// Normalize, tokenize and score raw document text.
    pub fn score_text(&self, raw: &str, keywords: &[String]) -> ScoreReport {
        let tokens = tokenize_document(raw);
        self.score(&tokens, keywords)
    }
}

/// One-shot scoring without keeping a `Scorer` around.
pub fn score(
    tokens: &[Token],
    keywords: &[String],
    fuzzy_threshold: u8,
    use_fuzzy: bool,
) -> ScoreReport {
    Scorer::new(use_fuzzy, fuzzy_threshold).score(tokens, keywords)
}
