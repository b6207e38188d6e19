// Ledger status display: record counts, criteria sets, recent verdicts.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::ledger::VerdictLedger;
use crate::output::truncate_chars;

/// Display ledger status for the ledger file at `ledger_path`.
pub fn show(ledger: &dyn VerdictLedger, ledger_path: &Path) -> Result<()> {
    let file_size = std::fs::metadata(ledger_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Ledger: {} ({})", ledger_path.display(), file_size);

    let stats = ledger.stats()?;
    if stats.total == 0 {
        println!("Verdicts: none recorded yet");
        println!("  Run `doclabel label --dir <PATH>` to label documents");
        return Ok(());
    }

    println!(
        "Verdicts: {} total, {} approved, {} canceled",
        stats.total,
        stats.approved.to_string().green(),
        stats.canceled.to_string().red()
    );
    println!("Criteria sets: {}", stats.criteria_sets);
    if stats.criteria_sets > 1 {
        println!(
            "  {} labels were produced under different keywords or thresholds",
            "~".yellow()
        );
    }
    if let Some(last) = &stats.last_recorded_at {
        println!("Last recorded: {last}");
    }

    let recent = ledger.recent(5)?;
    if !recent.is_empty() {
        println!("Recent verdicts:");
        for record in &recent {
            let verdict = if record.approved {
                "APPROVED".green()
            } else {
                "CANCELED".red()
            };
            println!(
                "  {}  {} (score={})  {}",
                record.recorded_at.dimmed(),
                verdict,
                record.score,
                truncate_chars(&record.path, 80)
            );
        }
    }

    Ok(())
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
