// Colored terminal output for run summaries, score breakdowns and
// classification results.
//
// main.rs display paths delegate here.

use std::path::Path;

use colored::Colorize;

use super::truncate_chars;
use crate::label::LabelOutcome;
use crate::oracle::{ClassifiedFile, OracleDecision};
use crate::pipeline::{FileResult, RunSummary};
use crate::scoring::{ScoreReport, Verdict};

/// Display a labeling run ranked by score.
pub fn display_run_summary(summary: &RunSummary, dry_run: bool) {
    if summary.results.is_empty() && summary.failures.is_empty() {
        println!("No matching files found.");
        return;
    }

    let title = if dry_run {
        format!("=== Labeling Summary ({} files, dry run) ===", summary.results.len())
    } else {
        format!("=== Labeling Summary ({} files) ===", summary.results.len())
    };
    println!("\n{}\n", title.bold());

    for result in summary.ranked() {
        display_result_line(result);
    }

    println!();
    println!(
        "  {} approved, {} canceled, {} renamed",
        summary.approved_count().to_string().green(),
        summary.canceled_count().to_string().red(),
        summary.renamed_count(),
    );
    if summary.stale_count() > 0 {
        println!(
            "  {} {} files carry a label that no longer matches (left unchanged)",
            "~".yellow(),
            summary.stale_count()
        );
    }

    if !summary.failures.is_empty() {
        println!("\n  {}", format!("{} files failed:", summary.failures.len()).red().bold());
        for failure in &summary.failures {
            println!(
                "    {}  {}",
                failure.path.display(),
                truncate_chars(&failure.error, 120).dimmed()
            );
        }
    }
}

fn display_result_line(result: &FileResult) {
    let note = match &result.outcome {
        LabelOutcome::Renamed { target } => format!("renamed to {}", file_name(target)),
        LabelOutcome::Planned { target } => format!("would rename to {}", file_name(target)),
        LabelOutcome::TargetExists { target } => format!("{} exists, skipped", file_name(target)),
        LabelOutcome::AlreadyLabeled { .. } => "already labeled".to_string(),
    };
    let stale = if result.stale {
        format!("  {}", "stale".yellow())
    } else {
        String::new()
    };

    println!(
        "  {}  ->  {}  (score={})  {}{}",
        result.path.display(),
        colorize_verdict(result.verdict()),
        result.score,
        note.dimmed(),
        stale,
    );
}

/// Display the keyword breakdown behind one file's score.
pub fn display_score_report(path: &Path, report: &ScoreReport, min_score: u32) {
    let verdict = Verdict::from_score(report.total_score, min_score);
    println!("\n{}", format!("=== Score for {} ===", path.display()).bold());
    println!(
        "  Verdict: {}  (score {} / threshold {})",
        colorize_verdict(verdict),
        report.total_score,
        min_score
    );

    if report.evidence.is_empty() {
        println!("  No keyword matched.");
        return;
    }

    println!();
    for ev in &report.evidence {
        println!(
            "  {:<20} {:>3} hits  (exact {}, fuzzy {})",
            ev.keyword.cyan(),
            ev.hit_count(),
            ev.exact.len(),
            ev.fuzzy.len()
        );
        if !ev.exact.is_empty() {
            let positions: Vec<String> = ev.exact_positions().iter().map(|p| p.to_string()).collect();
            println!("      exact at tokens {}", positions.join(", ").dimmed());
        }
        for hit in ev.fuzzy.iter().filter(|h| h.token != ev.normalized) {
            println!(
                "      fuzzy \"{}\" at {} ({:.0}%)",
                hit.token, hit.position, hit.similarity
            );
        }
    }
}

/// Display oracle classification results.
pub fn display_classification(results: &[ClassifiedFile]) {
    if results.is_empty() {
        println!("Nothing new to classify.");
        return;
    }

    println!(
        "\n{}\n",
        format!("=== Classification ({} files) ===", results.len()).bold()
    );
    for file in results {
        let label = if file.decision.positive {
            "Yes".green().bold()
        } else {
            "No".red()
        };
        let detail = classification_detail(&file.decision);
        println!("  {:<40} {}  {}", file_name(&file.path), label, detail.dimmed());
    }

    let positive = results.iter().filter(|r| r.decision.positive).count();
    println!("\n  {} positive, {} negative", positive, results.len() - positive);
}

/// One-line summary of how the oracle reached a decision.
///
/// `deciding_chunk` is already 1-based.
pub fn classification_detail(decision: &OracleDecision) -> String {
    match (&decision.answer, decision.deciding_chunk) {
        (Some(answer), Some(chunk)) => format!(
            "chunk {}/{} conf {:.2} {}",
            chunk,
            decision.chunks_total,
            answer.confidence,
            truncate_chars(&answer.evidence.join("; "), 80)
        ),
        _ => format!(
            "{} of {} chunks asked",
            decision.chunks_asked, decision.chunks_total
        ),
    }
}

/// Color a verdict label for terminal display.
pub fn colorize_verdict(verdict: Verdict) -> colored::ColoredString {
    match verdict {
        Verdict::Approved => verdict.as_str().green().bold(),
        Verdict::Canceled => verdict.as_str().red(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{Answer, OracleAnswer};

    fn decided_by(chunk: usize, total: usize) -> OracleDecision {
        OracleDecision {
            positive: true,
            chunks_total: total,
            chunks_asked: chunk,
            deciding_chunk: Some(chunk),
            answer: Some(OracleAnswer {
                answer: Answer::Yes,
                evidence: vec!["150 kW".to_string(), "1968 cm3".to_string()],
                confidence: 0.9,
            }),
        }
    }

    #[test]
    fn single_chunk_document_reports_chunk_one_of_one() {
        let detail = classification_detail(&decided_by(1, 1));
        assert!(detail.starts_with("chunk 1/1 "), "got {detail}");
        assert!(detail.contains("conf 0.90"));
        assert!(detail.contains("150 kW; 1968 cm3"));
    }

    #[test]
    fn last_chunk_never_exceeds_total() {
        let detail = classification_detail(&decided_by(3, 3));
        assert!(detail.starts_with("chunk 3/3 "), "got {detail}");
    }

    #[test]
    fn negative_reports_chunks_asked() {
        let decision = OracleDecision {
            positive: false,
            chunks_total: 4,
            chunks_asked: 4,
            deciding_chunk: None,
            answer: None,
        };
        assert_eq!(classification_detail(&decision), "4 of 4 chunks asked");
    }
}
