// Directory run: score every candidate file and label it.
//
// Files are processed strictly one at a time in walker order. Nothing is
// shared between files except the summary being built, which is returned
// to the caller. A failure on one file (unreadable, rename refused) is
// logged and recorded in the summary; the run moves on to the next file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::label::{apply_label, LabelError, LabelOutcome, LabelState};
use crate::ledger::{criteria_hash, VerdictLedger, VerdictRecord};
use crate::scoring::{KeywordEvidence, Scorer, ScoringOptions, Verdict};
use crate::source::{iter_paths, read_text, TextEncoding};

/// Everything a directory run needs besides the scorer and the ledger.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// File or directory to process
    pub root: PathBuf,
    pub keywords: Vec<String>,
    /// Allowed extensions, lower-case with leading dot; empty allows all
    pub extensions: Vec<String>,
    pub scoring: ScoringOptions,
    /// Compute verdicts without renaming or recording anything
    pub dry_run: bool,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

/// Per-file outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    /// Path the file was found at
    pub path: PathBuf,
    /// Path after labeling (same as `path` unless renamed)
    pub final_path: PathBuf,
    pub score: u32,
    pub approved: bool,
    pub evidence: Vec<KeywordEvidence>,
    pub outcome: LabelOutcome,
    pub encoding: TextEncoding,
    /// The file already carried a label that no longer matches the current
    /// verdict or criteria; it was left as is
    pub stale: bool,
}

impl FileResult {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_approved(self.approved)
    }
}

/// A file that could not be processed.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Label(#[from] LabelError),
}

/// Results of a run, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub results: Vec<FileResult>,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn approved_count(&self) -> usize {
        self.results.iter().filter(|r| r.approved).count()
    }

    pub fn canceled_count(&self) -> usize {
        self.results.len() - self.approved_count()
    }

    pub fn renamed_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.was_renamed()).count()
    }

    pub fn stale_count(&self) -> usize {
        self.results.iter().filter(|r| r.stale).count()
    }

    /// Results ordered by score, highest first (stable for ties).
    pub fn ranked(&self) -> Vec<&FileResult> {
        let mut ranked: Vec<&FileResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }
}

/// Process every candidate file under `options.root`.
///
/// Only enumeration errors (missing root) abort the run; everything after
/// that is isolated per file.
pub fn run(
    options: &RunOptions,
    scorer: &Scorer,
    ledger: &dyn VerdictLedger,
) -> Result<RunSummary> {
    let paths = iter_paths(&options.root, &options.extensions)?;
    let criteria = criteria_hash(&options.keywords, &options.scoring, scorer.fuzzy_active());
    info!(
        root = %options.root.display(),
        files = paths.len(),
        keywords = options.keywords.len(),
        min_score = options.scoring.min_score,
        fuzzy = scorer.fuzzy_active(),
        dry_run = options.dry_run,
        "Starting labeling run"
    );

    let pb = if options.show_progress {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Labeling [{bar:30}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut summary = RunSummary::default();
    for path in &paths {
        match process_file(path, options, scorer, &criteria, ledger) {
            Ok(result) => summary.results.push(result),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to process file, skipping");
                summary.failures.push(FileFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        processed = summary.results.len(),
        approved = summary.approved_count(),
        failed = summary.failures.len(),
        "Labeling run complete"
    );
    Ok(summary)
}

/// Score and label a single file.
pub fn process_file(
    path: &Path,
    options: &RunOptions,
    scorer: &Scorer,
    criteria: &str,
    ledger: &dyn VerdictLedger,
) -> Result<FileResult, FileError> {
    let decoded = read_text(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let report = scorer.score_text(&decoded.text, &options.keywords);
    let verdict = Verdict::from_score(report.total_score, options.scoring.min_score);
    debug!(
        path = %path.display(),
        score = report.total_score,
        verdict = %verdict,
        "Scored file"
    );

    let outcome = apply_label(path, verdict, options.dry_run)?;
    let final_path = outcome.final_path(path).to_path_buf();

    let stale = match &outcome {
        LabelOutcome::AlreadyLabeled { state } => check_existing_label(
            path,
            *state,
            verdict,
            criteria,
            &decoded.content_hash,
            ledger,
        ),
        _ => false,
    };

    let should_record = !options.dry_run
        && match &outcome {
            LabelOutcome::Renamed { .. } => true,
            // Backfill a label from an earlier run, but only when it agrees
            // with what we would decide now.
            LabelOutcome::AlreadyLabeled { .. } => !stale,
            LabelOutcome::Planned { .. } | LabelOutcome::TargetExists { .. } => false,
        };

    if should_record && ledger.is_enabled() {
        let record = VerdictRecord {
            content_hash: decoded.content_hash.clone(),
            path: final_path.to_string_lossy().into_owned(),
            approved: verdict.is_approved(),
            score: report.total_score,
            criteria_hash: criteria.to_string(),
            recorded_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        if let Err(e) = ledger.record(&record) {
            warn!(path = %final_path.display(), error = %e, "Failed to record verdict in ledger");
        }
    }

    Ok(FileResult {
        path: path.to_path_buf(),
        final_path,
        score: report.total_score,
        approved: verdict.is_approved(),
        evidence: report.evidence,
        outcome,
        encoding: decoded.encoding,
        stale,
    })
}

/// Compare an existing label against the current verdict and the ledger.
///
/// The label is never changed here; a mismatch is only reported.
fn check_existing_label(
    path: &Path,
    state: LabelState,
    verdict: Verdict,
    criteria: &str,
    content_hash: &str,
    ledger: &dyn VerdictLedger,
) -> bool {
    let mut stale = false;

    if state.verdict() != Some(verdict) {
        warn!(
            path = %path.display(),
            labeled = ?state,
            current = %verdict,
            "Existing label disagrees with current verdict; not relabeling"
        );
        stale = true;
    }

    match ledger.lookup(content_hash) {
        Ok(Some(record)) if record.criteria_hash != criteria => {
            warn!(
                path = %path.display(),
                recorded_at = %record.recorded_at,
                "Label was recorded under different keywords or thresholds; not relabeling"
            );
            stale = true;
        }
        Ok(_) => {}
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ledger lookup failed");
        }
    }

    stale
}
