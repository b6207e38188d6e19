// Batch classification with resume.
//
// Each decision is appended to the CSV as soon as it is made, and files
// already present in the CSV are skipped, so an interrupted batch picks up
// where it stopped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use super::chunk::{classify_document, clean_text, ChunkPolicy, OracleDecision};
use super::traits::ClassificationOracle;
use crate::output::csv::{append_classification, load_classified};
use crate::source::{iter_paths, read_text};

#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedFile {
    pub path: PathBuf,
    pub decision: OracleDecision,
}

/// Classify every candidate file under `root`, optionally recording to CSV.
///
/// Returns the files classified in this call; skipped (already recorded)
/// and unreadable files are not included.
pub fn classify_files(
    oracle: &dyn ClassificationOracle,
    root: &Path,
    extensions: &[String],
    policy: &ChunkPolicy,
    csv_path: Option<&Path>,
) -> Result<Vec<ClassifiedFile>> {
    let done: HashSet<String> = match csv_path {
        Some(p) => load_classified(p)?,
        None => HashSet::new(),
    };
    if !done.is_empty() {
        info!(already = done.len(), "Resuming classification from CSV");
    }

    let mut classified = Vec::new();
    for path in iter_paths(root, extensions)? {
        let name = file_key(&path);
        if done.contains(&name) {
            info!(file = %name, "Already classified, skipping");
            continue;
        }

        let text = match read_text(&path) {
            Ok(decoded) => clean_text(&decoded.text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read file, skipping");
                continue;
            }
        };

        let decision = classify_document(oracle, &text, policy);
        if let Some(p) = csv_path {
            append_classification(p, &name, decision.label())?;
        }
        classified.push(ClassifiedFile { path, decision });
    }

    Ok(classified)
}

/// The key a file is recorded under: its file name.
fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
