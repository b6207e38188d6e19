// Pipeline: walk, read, score, decide, label, record.

pub mod run;

pub use run::{process_file, run, FileError, FileFailure, FileResult, RunOptions, RunSummary};
