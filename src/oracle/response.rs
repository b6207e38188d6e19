// Fail-closed parsing of oracle responses.
//
// Models wrap their JSON in prose or code fences, so the outermost {...}
// span is extracted first. Missing fields, wrong types and unparseable
// JSON all degrade toward the negative answer rather than erroring.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use super::traits::{Answer, OracleAnswer};
use crate::output::truncate_chars;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("static pattern"));

/// Parse a raw oracle response into an answer.
///
/// Expected shape: `{"answer":"yes|no","evidence":[...],"confidence":0..1}`.
pub fn parse_response(raw: &str) -> OracleAnswer {
    let Some(span) = JSON_OBJECT.find(raw) else {
        warn!(response = %truncate_chars(raw, 120), "No JSON object in oracle response");
        return OracleAnswer::negative();
    };

    let value: Value = match serde_json::from_str(span.as_str()) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Oracle response is not valid JSON");
            return OracleAnswer::negative();
        }
    };

    let answer = match value.get("answer").and_then(Value::as_str) {
        Some(a) if a.trim().eq_ignore_ascii_case("yes") => Answer::Yes,
        _ => Answer::No,
    };

    let evidence = match value.get("evidence") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    OracleAnswer {
        answer,
        evidence,
        confidence: parse_confidence(value.get("confidence")),
    }
}

/// Numbers and numeric strings are accepted; anything else is 0.0.
fn parse_confidence(value: Option<&Value>) -> f64 {
    let confidence = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
