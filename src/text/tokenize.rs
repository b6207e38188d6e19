// Tokenizer: split normalized text into positioned word tokens.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use regex::Regex;

use super::normalize;

/// A run of Unicode word characters: letters, marks, digits and connector
/// punctuation such as `_`.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("static pattern"));

/// A normalized word unit and its 0-based ordinal in the token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub position: usize,
    pub text: String,
}

/// Split already-normalized text into tokens.
///
/// Everything that is not a word character is a separator and is dropped.
/// Pure: the same input always produces the same tokens and positions.
pub fn tokenize(text: &str) -> Vec<Token> {
    WORD_RE
        .find_iter(text)
        .enumerate()
        .map(|(position, m)| Token {
            position,
            text: m.as_str().to_string(),
        })
        .collect()
}

/// Normalize raw document text and tokenize it.
pub fn tokenize_document(raw: &str) -> Vec<Token> {
    tokenize(&normalize(raw))
}
