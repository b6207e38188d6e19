// Text cleanup, chunking, and the any-chunk-positive document decision.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::response::parse_response;
use super::traits::{ClassificationOracle, OracleAnswer};

static HYPHEN_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-\n").expect("static pattern"));
static INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("static pattern"));
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").expect("static pattern"));

/// How documents are cut up and judged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChunkPolicy {
    /// Characters per chunk
    pub chunk_size: usize,
    /// Characters between chunk starts; smaller than chunk_size so chunks overlap
    pub step: usize,
    /// Chunks this short or shorter are dropped
    pub min_chunk_chars: usize,
    /// Documents shorter than this are negative without asking
    pub min_document_chars: usize,
    /// Minimum confidence for a "yes" to count
    pub min_confidence: f64,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            chunk_size: 4000,
            step: 3000,
            min_chunk_chars: 100,
            min_document_chars: 50,
            min_confidence: 0.5,
        }
    }
}

/// Tidy OCR output: rejoin words hyphenated across line breaks, collapse
/// runs of spaces and tabs, squeeze blank-line runs to one blank line.
pub fn clean_text(text: &str) -> String {
    let text = HYPHEN_BREAK.replace_all(text, "");
    let text = INLINE_SPACE.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Split text into overlapping character windows.
///
/// Windows start every `step` characters and span `chunk_size` characters;
/// windows of `min_chunk_chars` or fewer are dropped, so a short tail after
/// the last full window disappears.
pub fn chunk_text(text: &str, policy: &ChunkPolicy) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let step = policy.step.max(1);
    let mut chunks = Vec::new();

    let mut start = 0;
    while start < chars.len() {
        let end = (start + policy.chunk_size).min(chars.len());
        if end - start > policy.min_chunk_chars {
            chunks.push(chars[start..end].iter().collect());
        }
        start += step;
    }
    chunks
}

/// Outcome of running a document past the oracle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleDecision {
    pub positive: bool,
    pub chunks_total: usize,
    pub chunks_asked: usize,
    /// 1-based index of the chunk that decided a positive outcome
    pub deciding_chunk: Option<usize>,
    /// The answer from the deciding chunk
    pub answer: Option<OracleAnswer>,
}

impl OracleDecision {
    fn negative(chunks_total: usize, chunks_asked: usize) -> Self {
        Self {
            positive: false,
            chunks_total,
            chunks_asked,
            deciding_chunk: None,
            answer: None,
        }
    }

    /// "Yes" / "No", the labels the classification CSV uses.
    pub fn label(&self) -> &'static str {
        if self.positive {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Classify a whole document: positive as soon as one chunk is.
///
/// Oracle errors count as a negative answer for that chunk and the next
/// chunk is tried.
pub fn classify_document(
    oracle: &dyn ClassificationOracle,
    text: &str,
    policy: &ChunkPolicy,
) -> OracleDecision {
    if text.chars().count() < policy.min_document_chars {
        debug!("Document too short for the oracle, answering no");
        return OracleDecision::negative(0, 0);
    }

    let chunks = chunk_text(text, policy);
    info!(chunks = chunks.len(), oracle = oracle.name(), "Classifying document");

    for (idx, chunk) in chunks.iter().enumerate() {
        let answer = match oracle.ask(chunk) {
            Ok(raw) => parse_response(&raw),
            Err(e) => {
                warn!(chunk = idx + 1, error = %e, "Oracle call failed, treating chunk as no");
                OracleAnswer::negative()
            }
        };

        if answer.is_positive(policy.min_confidence) {
            info!(
                chunk = idx + 1,
                confidence = answer.confidence,
                evidence = ?answer.evidence,
                "Chunk classified yes"
            );
            return OracleDecision {
                positive: true,
                chunks_total: chunks.len(),
                chunks_asked: idx + 1,
                deciding_chunk: Some(idx + 1),
                answer: Some(answer),
            };
        }
        debug!(chunk = idx + 1, confidence = answer.confidence, "Chunk classified no");
    }

    OracleDecision::negative(chunks.len(), chunks.len())
}
