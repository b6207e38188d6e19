// CSV output: the single-column verdict sheet and the classification log.
//
// Both files are small and flat, so they are written by hand. Fields are
// quoted only when they contain a separator, quote, or line break.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::pipeline::FileResult;

/// Header of the verdict sheet.
pub const APPROVED_HEADER: &str = "approved_sk";
/// Header of the classification log.
pub const CLASSIFICATION_HEADER: &str = "file,contains_specs";

/// Quote a field if it needs it.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// First field of a CSV line, unquoted.
pub fn first_field(line: &str) -> String {
    let Some(rest) = line.strip_prefix('"') else {
        return line.split(',').next().unwrap_or("").trim().to_string();
    };

    let mut out = String::new();
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                out.push('"');
                chars.next();
            } else {
                break;
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Write the `approved_sk` sheet: one `ano`/`nie` row per result, in
/// processing order.
pub fn write_approved_csv(path: &Path, results: &[FileResult]) -> Result<()> {
    let mut out = String::from(APPROVED_HEADER);
    out.push('\n');
    for result in results {
        out.push_str(result.verdict().as_sk());
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("Failed to write CSV to {}", path.display()))
}

/// Append one classification row, writing the header if the file is new.
pub fn append_classification(path: &Path, file: &str, label: &str) -> Result<()> {
    let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open CSV at {}", path.display()))?;
    if needs_header {
        writeln!(f, "{CLASSIFICATION_HEADER}")?;
    }
    writeln!(f, "{},{}", escape_field(file), escape_field(label))?;
    Ok(())
}

/// File names already present in a classification log.
///
/// A missing log is empty. An unreadable one is reported and treated as
/// empty, so the batch starts over instead of failing.
pub fn load_classified(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Classification CSV unreadable, starting over");
            return Ok(HashSet::new());
        }
    };

    Ok(content
        .trim_start_matches('\u{feff}')
        .lines()
        .skip(1)
        .map(first_field)
        .filter(|f| !f.is_empty())
        .collect())
}
