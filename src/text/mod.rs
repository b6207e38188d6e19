// Text preparation: normalization and tokenization.
//
// Keywords and documents go through the same two steps so that comparison
// downstream is plain string equality (or a similarity ratio) on folded text.

pub mod normalize;
pub mod tokenize;

pub use normalize::normalize;
pub use tokenize::{tokenize, tokenize_document, Token};
