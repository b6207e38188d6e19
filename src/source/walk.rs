// Directory walker: enumerate files under a root, filtered by extension.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::ledger::LEDGER_FILE_NAME;

/// Extensions processed when the caller does not pass any.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".txt", ".md", ".log"];

/// Parse a comma/semicolon separated extension list.
///
/// Entries are trimmed and lower-cased and gain a leading dot if missing, so
/// "TXT; .md" becomes [".txt", ".md"].
pub fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|e| {
            let e = e.to_lowercase();
            if e.starts_with('.') {
                e
            } else {
                format!(".{e}")
            }
        })
        .collect()
}

/// Case-insensitive suffix match of a file name against the allowed
/// extensions. An empty list allows everything.
pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// Collect the files to process under `root`.
///
/// A file root is returned alone if it passes the filter. A directory root
/// is walked recursively in file-name order so runs are reproducible. Hidden
/// files and directories are walked like any other; only the verdict ledger
/// and its `-wal`/`-shm` companions are left out. Unreadable entries are
/// logged and skipped.
pub fn iter_paths(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        anyhow::bail!("Path not found: {}", root.display());
    }

    if root.is_file() {
        return Ok(if matches_extension(root, extensions) {
            vec![root.to_path_buf()]
        } else {
            debug!(path = %root.display(), "Root file does not match extension filter");
            Vec::new()
        });
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ledger_file(e.file_name()));

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if matches_extension(entry.path(), extensions) {
            paths.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = paths.len(), "Collected candidate files");
    Ok(paths)
}

fn is_ledger_file(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with(LEDGER_FILE_NAME)
}
