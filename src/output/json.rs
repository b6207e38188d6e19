// JSON report: the full per-file evidence of a run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::pipeline::{RunOptions, RunSummary};
use crate::scoring::ScoringOptions;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: String,
    pub root: &'a Path,
    pub keywords: &'a [String],
    pub scoring: ScoringOptions,
    pub fuzzy_active: bool,
    pub dry_run: bool,
    #[serde(flatten)]
    pub summary: &'a RunSummary,
}

impl<'a> JsonReport<'a> {
    pub fn new(options: &'a RunOptions, fuzzy_active: bool, summary: &'a RunSummary) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            root: &options.root,
            keywords: &options.keywords,
            scoring: options.scoring,
            fuzzy_active,
            dry_run: options.dry_run,
            summary,
        }
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_json_report(path: &Path, report: &JsonReport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("Failed to write JSON report to {}", path.display()))
}
