// Label state: read and write the verdict marker in a file name.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scoring::Verdict;

/// Where a file sits in the labeling lifecycle, judged by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelState {
    Unlabeled,
    Approved,
    Canceled,
}

impl LabelState {
    /// Inspect the file stem (name without its last extension) for a marker.
    pub fn of(path: &Path) -> Self {
        let Some(stem) = path.file_stem() else {
            return LabelState::Unlabeled;
        };
        let stem = stem.to_string_lossy();
        if stem.ends_with(Verdict::Approved.marker()) {
            LabelState::Approved
        } else if stem.ends_with(Verdict::Canceled.marker()) {
            LabelState::Canceled
        } else {
            LabelState::Unlabeled
        }
    }

    pub fn is_labeled(&self) -> bool {
        !matches!(self, LabelState::Unlabeled)
    }

    /// The verdict a labeled file carries, if any.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            LabelState::Unlabeled => None,
            LabelState::Approved => Some(Verdict::Approved),
            LabelState::Canceled => Some(Verdict::Canceled),
        }
    }
}

impl From<Verdict> for LabelState {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approved => LabelState::Approved,
            Verdict::Canceled => LabelState::Canceled,
        }
    }
}

/// The name a file gets once labeled: the marker goes between the stem and
/// the last extension, in the same directory.
///
/// `a.txt` -> `a_Approved.txt`, `report.tar.gz` -> `report.tar_Approved.gz`,
/// `notes` -> `notes_Canceled`.
pub fn labeled_path(path: &Path, verdict: Verdict) -> PathBuf {
    let mut name: OsString = path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(verdict.marker());
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_goes_before_extension() {
        assert_eq!(
            labeled_path(Path::new("docs/a.txt"), Verdict::Approved),
            PathBuf::from("docs/a_Approved.txt")
        );
    }

    #[test]
    fn only_last_extension_is_kept_apart() {
        assert_eq!(
            labeled_path(Path::new("report.tar.gz"), Verdict::Canceled),
            PathBuf::from("report.tar_Canceled.gz")
        );
    }

    #[test]
    fn no_extension() {
        assert_eq!(
            labeled_path(Path::new("notes"), Verdict::Canceled),
            PathBuf::from("notes_Canceled")
        );
    }

    #[test]
    fn state_round_trips_through_path() {
        for verdict in [Verdict::Approved, Verdict::Canceled] {
            let labeled = labeled_path(Path::new("dir/x.md"), verdict);
            assert_eq!(LabelState::of(&labeled), LabelState::from(verdict));
            assert_eq!(LabelState::of(&labeled).verdict(), Some(verdict));
        }
    }

    #[test]
    fn marker_in_the_middle_is_not_a_label() {
        assert_eq!(
            LabelState::of(Path::new("x_Approved_draft.txt")),
            LabelState::Unlabeled
        );
    }
}
