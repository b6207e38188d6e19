use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::scoring::{ScoringOptions, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MIN_SCORE};
use crate::source::{parse_extensions, DEFAULT_EXTENSIONS};

/// Defaults loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// value here can be overridden by the matching CLI flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// DOCLABEL_MIN_SCORE (default 2)
    pub min_score: u32,
    /// DOCLABEL_FUZZY_THRESHOLD, 0-100 (default 80)
    pub fuzzy_threshold: u8,
    /// DOCLABEL_USE_FUZZY (default off)
    pub use_fuzzy: bool,
    /// DOCLABEL_EXTENSIONS, comma/semicolon separated (default .txt,.md,.log)
    pub extensions: Vec<String>,
    /// DOCLABEL_LEDGER_PATH; unset means `.doclabel.db` in the run root
    pub ledger_path: Option<PathBuf>,
    /// DOCLABEL_ORACLE_CMD, the command line `classify` pipes chunks through
    pub oracle_cmd: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            use_fuzzy: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ledger_path: None,
            oracle_cmd: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Blank values count as unset. Unparseable numbers and out-of-range
    /// thresholds are errors rather than silent defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Config::default();

        if let Some(raw) = get("DOCLABEL_MIN_SCORE") {
            config.min_score = raw
                .parse()
                .with_context(|| format!("DOCLABEL_MIN_SCORE must be a non-negative integer, got {raw:?}"))?;
        }

        if let Some(raw) = get("DOCLABEL_FUZZY_THRESHOLD") {
            let threshold: u32 = raw
                .parse()
                .with_context(|| format!("DOCLABEL_FUZZY_THRESHOLD must be an integer, got {raw:?}"))?;
            if threshold > 100 {
                anyhow::bail!("DOCLABEL_FUZZY_THRESHOLD must be between 0 and 100, got {threshold}");
            }
            config.fuzzy_threshold = threshold as u8;
        }

        if let Some(raw) = get("DOCLABEL_USE_FUZZY") {
            config.use_fuzzy = parse_flag(&raw)
                .with_context(|| format!("DOCLABEL_USE_FUZZY must be true or false, got {raw:?}"))?;
        }

        if let Some(raw) = get("DOCLABEL_EXTENSIONS") {
            config.extensions = parse_extensions(&raw);
        }

        config.ledger_path = get("DOCLABEL_LEDGER_PATH").map(PathBuf::from);
        config.oracle_cmd = get("DOCLABEL_ORACLE_CMD");

        Ok(config)
    }

    pub fn scoring(&self) -> ScoringOptions {
        self.scoring_with(None, None, None)
    }

    /// Scoring options with explicit overrides taking precedence.
    ///
    /// `use_fuzzy: Some(false)` switches fuzzy matching off even when
    /// DOCLABEL_USE_FUZZY turned it on.
    pub fn scoring_with(
        &self,
        min_score: Option<u32>,
        fuzzy_threshold: Option<u8>,
        use_fuzzy: Option<bool>,
    ) -> ScoringOptions {
        ScoringOptions {
            min_score: min_score.unwrap_or(self.min_score),
            fuzzy_threshold: fuzzy_threshold.unwrap_or(self.fuzzy_threshold),
            use_fuzzy: use_fuzzy.unwrap_or(self.use_fuzzy),
        }
    }
}

/// Split a comma/semicolon separated list, dropping blank entries.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("not a boolean"),
    }
}
