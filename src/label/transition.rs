// Apply a verdict to a file on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::{labeled_path, LabelState};
use crate::scoring::Verdict;

/// What happened to a file's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelOutcome {
    /// The file was renamed to carry the verdict
    Renamed { target: PathBuf },
    /// Dry run: the file would have been renamed
    Planned { target: PathBuf },
    /// A file with the target name exists already; treated as done
    TargetExists { target: PathBuf },
    /// The file name carries a marker from an earlier run
    AlreadyLabeled { state: LabelState },
}

impl LabelOutcome {
    /// The path the file lives at after the transition.
    pub fn final_path<'a>(&'a self, original: &'a Path) -> &'a Path {
        match self {
            LabelOutcome::Renamed { target } => target,
            _ => original,
        }
    }

    pub fn was_renamed(&self) -> bool {
        matches!(self, LabelOutcome::Renamed { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("failed to rename {} -> {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Move `path` into the labeled state for `verdict`.
///
/// Already-labeled names and existing targets are skipped, never
/// overwritten. The rename itself is a single `fs::rename`, so it is as
/// atomic as the filesystem makes it.
pub fn apply_label(
    path: &Path,
    verdict: Verdict,
    dry_run: bool,
) -> Result<LabelOutcome, LabelError> {
    let state = LabelState::of(path);
    if state.is_labeled() {
        debug!(path = %path.display(), ?state, "Already labeled, leaving name as is");
        return Ok(LabelOutcome::AlreadyLabeled { state });
    }

    let target = labeled_path(path, verdict);
    if target.exists() {
        info!(
            target = %target.display(),
            "Target already exists, skipping rename"
        );
        return Ok(LabelOutcome::TargetExists { target });
    }

    if dry_run {
        return Ok(LabelOutcome::Planned { target });
    }

    fs::rename(path, &target).map_err(|source| LabelError::Rename {
        from: path.to_path_buf(),
        to: target.clone(),
        source,
    })?;
    info!(from = %path.display(), to = %target.display(), "File renamed");

    Ok(LabelOutcome::Renamed { target })
}
