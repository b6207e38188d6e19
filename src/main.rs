use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use doclabel::config::{parse_list, Config};
use doclabel::ledger::{default_ledger_path, NoopLedger, VerdictLedger};
use doclabel::oracle::command::DEFAULT_PROMPT;
use doclabel::oracle::{classify_files, ChunkPolicy, CommandOracle};
use doclabel::output::json::{write_json_report, JsonReport};
use doclabel::output::table::{render_verdict_table, TableStyle};
use doclabel::output::{csv, terminal};
use doclabel::pipeline::{run, RunOptions};
use doclabel::scoring::{Scorer, ScoringOptions, Verdict};
use doclabel::source::{parse_extensions, read_text};
use doclabel::text::tokenize_document;

/// doclabel: score text documents against a keyword set and label them.
///
/// Each file is renamed to carry its verdict (`report_Approved.txt`,
/// `report_Canceled.txt`). Re-running over the same directory changes nothing.
#[derive(Parser)]
#[command(name = "doclabel", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every document under a directory and rename it with its verdict
    Label {
        /// File or directory to process
        #[arg(long)]
        dir: PathBuf,

        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Extensions to include, comma or semicolon separated (default: .txt,.md,.log)
        #[arg(long)]
        extensions: Option<String>,

        /// Compute verdicts without renaming anything
        #[arg(long)]
        dry_run: bool,

        /// Do not read or write the verdict ledger
        #[arg(long)]
        no_ledger: bool,

        /// Ledger location (default: .doclabel.db inside --dir)
        #[arg(long)]
        ledger: Option<PathBuf>,

        /// Write the approved_sk verdict sheet to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write a JSON report with per-keyword evidence to this file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Print a two-column verdict table
        #[arg(long, value_enum)]
        table: Option<TableStyle>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Score a single file and show the evidence, without renaming it
    Score {
        /// The file to score
        #[arg(long)]
        file: PathBuf,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Ask an external classifier about each document, chunk by chunk
    Classify {
        /// File or directory to process
        #[arg(long)]
        dir: PathBuf,

        /// Command that reads a prompt on stdin and prints a JSON answer
        /// (default: DOCLABEL_ORACLE_CMD)
        #[arg(long)]
        oracle_cmd: Option<String>,

        /// Append file,contains_specs rows here and skip files already listed
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Replace the built-in prompt with the contents of this file
        #[arg(long)]
        prompt_file: Option<PathBuf>,

        /// Extensions to include, comma or semicolon separated
        #[arg(long)]
        extensions: Option<String>,
    },

    /// Show verdict ledger statistics
    Status {
        /// Ledger file to inspect
        #[arg(long, conflicts_with = "dir")]
        ledger: Option<PathBuf>,

        /// Directory whose default ledger to inspect
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Keyword set and thresholds shared by `label` and `score`.
#[derive(Args, Debug, Clone)]
struct CriteriaArgs {
    /// Keywords, comma or semicolon separated (e.g. "kW,cm3")
    #[arg(long, short)]
    keywords: String,

    /// Also count approximate matches (Indel similarity)
    #[arg(long)]
    use_fuzzy: bool,

    /// Count exact matches only, even if DOCLABEL_USE_FUZZY is set
    #[arg(long, conflicts_with = "use_fuzzy")]
    no_fuzzy: bool,

    /// Minimum similarity for a fuzzy hit, 0-100 (default: 80)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    fuzzy_threshold: Option<u8>,

    /// Minimum total score for approval (default: 2)
    #[arg(long)]
    min_score: Option<u32>,
}

impl CriteriaArgs {
    /// Resolve keywords and scoring options, CLI flags over env config.
    fn resolve(&self, config: &Config) -> (Vec<String>, ScoringOptions) {
        let keywords = parse_list(&self.keywords);
        let use_fuzzy = match (self.use_fuzzy, self.no_fuzzy) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        let scoring = config.scoring_with(self.min_score, self.fuzzy_threshold, use_fuzzy);
        warn_about_criteria(&keywords, &scoring);
        (keywords, scoring)
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("doclabel=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Label {
            dir,
            criteria,
            extensions,
            dry_run,
            no_ledger,
            ledger,
            csv: csv_path,
            json,
            table,
            no_progress,
        } => {
            let (keywords, scoring) = criteria.resolve(&config);
            let options = RunOptions {
                extensions: resolve_extensions(extensions.as_deref(), &config),
                root: dir,
                keywords,
                scoring,
                dry_run,
                show_progress: !no_progress,
            };

            let ledger: Box<dyn VerdictLedger> = if no_ledger {
                Box::new(NoopLedger)
            } else {
                let path = ledger
                    .or_else(|| config.ledger_path.clone())
                    .unwrap_or_else(|| default_ledger_path(&options.root));
                open_ledger(&path, dry_run)?
            };

            let scorer = Scorer::new(scoring.use_fuzzy, scoring.fuzzy_threshold);
            let summary = run(&options, &scorer, ledger.as_ref())?;

            terminal::display_run_summary(&summary, dry_run);

            if let Some(style) = table {
                let verdicts: Vec<Verdict> = summary.results.iter().map(|r| r.verdict()).collect();
                println!("\n{}", render_verdict_table(&verdicts, style));
            }
            if let Some(path) = &csv_path {
                csv::write_approved_csv(path, &summary.results)?;
                println!("\nCSV written to {}", path.display().to_string().bold());
            }
            if let Some(path) = &json {
                let report = JsonReport::new(&options, scorer.fuzzy_active(), &summary);
                write_json_report(path, &report)?;
                println!("JSON report written to {}", path.display().to_string().bold());
            }
        }

        Commands::Score { file, criteria } => {
            if !file.is_file() {
                anyhow::bail!("Not a file: {}", file.display());
            }
            let (keywords, scoring) = criteria.resolve(&config);
            let decoded = read_text(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let scorer = Scorer::new(scoring.use_fuzzy, scoring.fuzzy_threshold);
            let report = scorer.score_text(&decoded.text, &keywords);
            terminal::display_score_report(&file, &report, scoring.min_score);
        }

        Commands::Classify {
            dir,
            oracle_cmd,
            csv: csv_path,
            prompt_file,
            extensions,
        } => {
            let Some(command_line) = oracle_cmd.or_else(|| config.oracle_cmd.clone()) else {
                anyhow::bail!(
                    "No oracle command configured. Pass --oracle-cmd or set DOCLABEL_ORACLE_CMD \
                     in your .env file."
                );
            };
            let prompt = match &prompt_file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read prompt file {}", path.display()))?,
                None => DEFAULT_PROMPT.to_string(),
            };

            let oracle = CommandOracle::from_command_line(&command_line, prompt)?;
            let extensions = resolve_extensions(extensions.as_deref(), &config);
            info!(oracle = %command_line, root = %dir.display(), "Starting classification");

            let results = classify_files(
                &oracle,
                &dir,
                &extensions,
                &ChunkPolicy::default(),
                csv_path.as_deref(),
            )?;
            terminal::display_classification(&results);
            if let Some(path) = &csv_path {
                println!("\nResults in {}", path.display().to_string().bold());
            }
        }

        Commands::Status { ledger, dir } => {
            let path = ledger
                .or_else(|| config.ledger_path.clone())
                .unwrap_or_else(|| default_ledger_path(dir.as_deref().unwrap_or(Path::new("."))));
            show_status(&path)?;
        }
    }

    Ok(())
}

/// Extensions from the flag, else from config.
fn resolve_extensions(flag: Option<&str>, config: &Config) -> Vec<String> {
    match flag {
        Some(raw) => parse_extensions(raw),
        None => config.extensions.clone(),
    }
}

/// Criteria that are legal but almost certainly a mistake.
fn warn_about_criteria(keywords: &[String], scoring: &ScoringOptions) {
    if keywords.is_empty() {
        warn!("No keywords given; every document will score 0");
    }
    if scoring.min_score == 0 {
        warn!("min-score is 0; every document will be approved");
    }
    for keyword in keywords {
        if tokenize_document(keyword).len() > 1 {
            warn!(
                keyword = %keyword,
                "Keyword spans several words and can never match a single token"
            );
        }
    }
}

/// Open the verdict ledger for a run.
///
/// A dry run never creates a ledger; it only reads one that already exists.
#[cfg(feature = "sqlite")]
fn open_ledger(path: &Path, dry_run: bool) -> Result<Box<dyn VerdictLedger>> {
    use doclabel::ledger::SqliteLedger;

    if dry_run && !path.exists() {
        return Ok(Box::new(NoopLedger));
    }
    let conn = if dry_run {
        doclabel::ledger::open(path)?
    } else {
        doclabel::ledger::initialize(path)?
    };
    info!(path = %path.display(), "Using verdict ledger");
    Ok(Box::new(SqliteLedger::new(conn)))
}

#[cfg(not(feature = "sqlite"))]
fn open_ledger(_path: &Path, _dry_run: bool) -> Result<Box<dyn VerdictLedger>> {
    warn!("Built without the sqlite feature; verdicts are not recorded");
    Ok(Box::new(NoopLedger))
}

#[cfg(feature = "sqlite")]
fn show_status(path: &Path) -> Result<()> {
    if !path.exists() {
        println!("Ledger: not found at {}", path.display());
        println!("\nRun `doclabel label --dir <PATH>` to create it.");
        return Ok(());
    }
    let ledger = doclabel::ledger::SqliteLedger::new(doclabel::ledger::open(path)?);
    doclabel::status::show(&ledger, path)
}

#[cfg(not(feature = "sqlite"))]
fn show_status(_path: &Path) -> Result<()> {
    anyhow::bail!("This build has no ledger support (rebuild with the `sqlite` feature)")
}
