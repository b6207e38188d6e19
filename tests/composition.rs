// Composition tests: the full walk -> read -> score -> decide -> label
// chain over real temporary directories.
//
// Each test builds a small document tree, runs the pipeline, and checks
// both the returned RunSummary and the file names left on disk.

use std::fs;
use std::path::Path;

use doclabel::label::{LabelOutcome, LabelState};
use doclabel::ledger::{criteria_hash, NoopLedger, VerdictLedger};
use doclabel::output::csv::write_approved_csv;
use doclabel::output::json::JsonReport;
use doclabel::pipeline::{process_file, run, FileError, RunOptions};
use doclabel::scoring::{Scorer, ScoringOptions, Verdict};
use doclabel::source::TextEncoding;

const VEHICLE: &str = "Škoda Octavia, výkon 90 kW, objem 1968 cm3, spotreba 5.5 l";
const INVOICE: &str = "Faktúra č. 2024/001, VIN WAUZZZ8V0JA000000";

fn options(root: &Path, keywords: &[&str]) -> RunOptions {
    RunOptions {
        root: root.to_path_buf(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        extensions: vec![".txt".to_string()],
        scoring: ScoringOptions::default(),
        dry_run: false,
        show_progress: false,
    }
}

fn exact_scorer() -> Scorer {
    Scorer::new(false, 80)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn vehicle_and_invoice() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), VEHICLE).unwrap();
    fs::write(dir.path().join("b.txt"), INVOICE).unwrap();
    dir
}

// ============================================================
// Chain: directory -> verdicts -> renamed files
// ============================================================

#[test]
fn vehicle_spec_is_approved_and_invoice_canceled() {
    let dir = vehicle_and_invoice();
    let summary = run(&options(dir.path(), &["kW", "cm3"]), &exact_scorer(), &NoopLedger).unwrap();

    assert!(summary.failures.is_empty());
    assert_eq!(summary.results.len(), 2);

    let a = &summary.results[0];
    assert!(a.path.ends_with("a.txt"));
    assert_eq!(a.score, 2);
    assert!(a.approved);
    assert_eq!(a.final_path, dir.path().join("a_Approved.txt"));

    let b = &summary.results[1];
    assert_eq!(b.score, 0);
    assert!(!b.approved);
    assert!(b.evidence.is_empty());
    assert_eq!(b.final_path, dir.path().join("b_Canceled.txt"));

    assert_eq!(file_names(dir.path()), vec!["a_Approved.txt", "b_Canceled.txt"]);
    assert_eq!(summary.approved_count(), 1);
    assert_eq!(summary.renamed_count(), 2);
}

#[test]
fn second_run_leaves_file_set_unchanged() {
    let dir = vehicle_and_invoice();
    let opts = options(dir.path(), &["kW", "cm3"]);
    run(&opts, &exact_scorer(), &NoopLedger).unwrap();
    let after_first = file_names(dir.path());

    let second = run(&opts, &exact_scorer(), &NoopLedger).unwrap();

    assert_eq!(file_names(dir.path()), after_first);
    assert_eq!(second.renamed_count(), 0);
    assert_eq!(second.stale_count(), 0);
    assert!(second
        .results
        .iter()
        .all(|r| matches!(r.outcome, LabelOutcome::AlreadyLabeled { .. })));
}

#[test]
fn dry_run_renames_nothing() {
    let dir = vehicle_and_invoice();
    let mut opts = options(dir.path(), &["kW", "cm3"]);
    opts.dry_run = true;

    let summary = run(&opts, &exact_scorer(), &NoopLedger).unwrap();

    assert_eq!(file_names(dir.path()), vec!["a.txt", "b.txt"]);
    assert!(matches!(summary.results[0].outcome, LabelOutcome::Planned { .. }));
    assert_eq!(summary.approved_count(), 1);
}

#[test]
fn ranked_results_put_highest_score_first() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "kw").unwrap();
    fs::write(dir.path().join("b.txt"), "kw cm3 kw").unwrap();
    fs::write(dir.path().join("c.txt"), "nothing").unwrap();

    let summary = run(&options(dir.path(), &["kW", "cm3"]), &exact_scorer(), &NoopLedger).unwrap();
    let scores: Vec<u32> = summary.ranked().iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![3, 1, 0]);
}

// ============================================================
// Walker and reader edge cases
// ============================================================

#[test]
fn single_file_root() {
    let dir = vehicle_and_invoice();
    let summary = run(
        &options(&dir.path().join("a.txt"), &["kW", "cm3"]),
        &exact_scorer(),
        &NoopLedger,
    )
    .unwrap();

    assert_eq!(summary.results.len(), 1);
    assert_eq!(file_names(dir.path()), vec!["a_Approved.txt", "b.txt"]);
}

#[test]
fn nested_directories_and_filters() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
    fs::create_dir_all(dir.path().join(".archive")).unwrap();
    fs::write(dir.path().join("sub/deeper/spec.TXT"), VEHICLE).unwrap();
    fs::write(dir.path().join("sub/scan.pdf"), VEHICLE).unwrap();
    fs::write(dir.path().join(".archive/old.txt"), VEHICLE).unwrap();

    let summary = run(&options(dir.path(), &["kW", "cm3"]), &exact_scorer(), &NoopLedger).unwrap();

    assert_eq!(summary.results.len(), 2);
    assert!(dir.path().join("sub/deeper/spec_Approved.TXT").exists());
    assert!(dir.path().join("sub/scan.pdf").exists());
    assert!(dir.path().join(".archive/old_Approved.txt").exists());
}

#[cfg(feature = "sqlite")]
#[test]
fn ledger_inside_root_is_never_labeled() {
    use doclabel::ledger::{default_ledger_path, initialize, SqliteLedger};

    let dir = vehicle_and_invoice();
    fs::write(dir.path().join(".notes.txt"), VEHICLE).unwrap();
    let ledger = SqliteLedger::new(initialize(&default_ledger_path(dir.path())).unwrap());

    let mut opts = options(dir.path(), &["kW", "cm3"]);
    opts.extensions.clear();
    let summary = run(&opts, &exact_scorer(), &ledger).unwrap();

    assert_eq!(summary.results.len(), 3);
    assert!(summary.failures.is_empty());
    assert!(dir.path().join(".doclabel.db").exists());
    assert!(dir.path().join(".notes_Approved.txt").exists());
}

#[test]
fn latin1_file_is_scored() {
    let dir = tempfile::tempdir().unwrap();
    // "Výkon 90 kW, 1968 cm3" with ý as the single Latin-1 byte 0xFD
    let bytes = b"V\xfdkon 90 kW, 1968 cm3".to_vec();
    fs::write(dir.path().join("old.txt"), bytes).unwrap();

    let summary = run(
        &options(dir.path(), &["kW", "cm3", "výkon"]),
        &exact_scorer(),
        &NoopLedger,
    )
    .unwrap();

    let r = &summary.results[0];
    assert_eq!(r.encoding, TextEncoding::Latin1);
    assert_eq!(r.score, 3);
    assert!(dir.path().join("old_Approved.txt").exists());
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = run(
        &options(&dir.path().join("nope"), &["kW"]),
        &exact_scorer(),
        &NoopLedger,
    );
    assert!(result.is_err());
}

// ============================================================
// Failure isolation
// ============================================================

#[test]
fn unreadable_path_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path(), &["kW"]);
    let criteria = criteria_hash(&opts.keywords, &opts.scoring, false);

    // A directory cannot be read as a file
    let err = process_file(dir.path(), &opts, &exact_scorer(), &criteria, &NoopLedger).unwrap_err();
    assert!(matches!(err, FileError::Read { .. }));
}

#[test]
fn collision_is_not_a_failure() {
    let dir = vehicle_and_invoice();
    fs::write(dir.path().join("a_Approved.txt"), "older copy").unwrap();

    let summary = run(&options(dir.path(), &["kW", "cm3"]), &exact_scorer(), &NoopLedger).unwrap();

    assert!(summary.failures.is_empty());
    let a = summary
        .results
        .iter()
        .find(|r| r.path.ends_with("a.txt"))
        .unwrap();
    assert!(matches!(a.outcome, LabelOutcome::TargetExists { .. }));
    assert!(dir.path().join("a.txt").exists());
}

// ============================================================
// Stale labels
// ============================================================

#[test]
fn contradicting_label_is_flagged_not_changed() {
    let dir = vehicle_and_invoice();
    run(&options(dir.path(), &["kW", "cm3"]), &exact_scorer(), &NoopLedger).unwrap();

    // Different criteria flip both verdicts
    let summary = run(&options(dir.path(), &["faktura", "vin"]), &exact_scorer(), &NoopLedger).unwrap();

    assert_eq!(summary.stale_count(), 2);
    assert_eq!(file_names(dir.path()), vec!["a_Approved.txt", "b_Canceled.txt"]);
    let b = &summary.results[1];
    assert!(b.approved);
    assert!(matches!(
        b.outcome,
        LabelOutcome::AlreadyLabeled {
            state: LabelState::Canceled
        }
    ));
}

#[cfg(feature = "sqlite")]
#[test]
fn changed_criteria_are_detected_through_the_ledger() {
    use doclabel::ledger::SqliteLedger;

    let dir = vehicle_and_invoice();
    let ledger = SqliteLedger::in_memory().unwrap();

    run(&options(dir.path(), &["kW", "cm3"]), &exact_scorer(), &ledger).unwrap();
    let stats = ledger.stats().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.approved, 1);

    // Same verdicts, same criteria: nothing stale
    let same = run(&options(dir.path(), &["cm3", "KW"]), &exact_scorer(), &ledger).unwrap();
    assert_eq!(same.stale_count(), 0);

    // Same verdicts under a different keyword set: stale via the ledger
    let changed = run(&options(dir.path(), &["kW", "cm3", "objem"]), &exact_scorer(), &ledger).unwrap();
    assert_eq!(changed.stale_count(), 2);
    assert_eq!(file_names(dir.path()), vec!["a_Approved.txt", "b_Canceled.txt"]);

    // Stale results are not written back
    assert_eq!(ledger.stats().unwrap().criteria_sets, 1);
}

// ============================================================
// Reports
// ============================================================

#[test]
fn csv_has_one_row_per_file_in_processing_order() {
    let dir = vehicle_and_invoice();
    let summary = run(&options(dir.path(), &["kW", "cm3"]), &exact_scorer(), &NoopLedger).unwrap();

    let out = tempfile::tempdir().unwrap();
    let csv = out.path().join("out.csv");
    write_approved_csv(&csv, &summary.results).unwrap();

    assert_eq!(fs::read_to_string(&csv).unwrap(), "approved_sk\nano\nnie\n");
}

#[test]
fn json_report_carries_evidence() {
    let dir = vehicle_and_invoice();
    let opts = options(dir.path(), &["kW", "cm3"]);
    let summary = run(&opts, &exact_scorer(), &NoopLedger).unwrap();

    let report = JsonReport::new(&opts, false, &summary);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["fuzzy_active"], false);
    assert_eq!(json["scoring"]["min_score"], 2);
    let a = &json["results"][0];
    assert_eq!(a["score"], 2);
    assert_eq!(a["outcome"]["kind"], "renamed");
    assert_eq!(a["evidence"][0]["keyword"], "kW");
    assert_eq!(a["evidence"][0]["exact"][0]["token"], "kw");
    assert_eq!(summary.results[0].verdict(), Verdict::Approved);
}
