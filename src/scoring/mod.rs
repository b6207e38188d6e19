// Scoring: keyword hit aggregation and the approve/cancel decision.

pub mod decision;
pub mod report;
pub mod scorer;

pub use decision::{
    decide, ScoringOptions, Verdict, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MIN_SCORE,
};
pub use report::{KeywordEvidence, ScoreReport};
pub use scorer::{score, Scorer};
