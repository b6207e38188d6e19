// doclabel: keyword scoring and approve/cancel labeling for text documents
//
// This is the library root. Modules are listed leaf to root: text feeds
// matching, matching feeds scoring, and the pipeline drives a run from
// directory walk to rename and ledger record.

pub mod config;
pub mod label;
pub mod ledger;
pub mod matching;
pub mod oracle;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod source;
pub mod status;
pub mod text;
