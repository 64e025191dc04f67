//! Response extraction: pulls the JSON object out of free-form model output.
//!
//! The brace scrape is a heuristic. Callers only see `try_parse_embedded_json`
//! and `extract_evaluation`, so a grammar-based extractor can replace it later.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use super::types::{EvaluationResult, RawEvaluation};

/// Greedy: first `{` through the last `}` in the whole text.
static EMBEDDED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("embedded-object pattern is valid"));

pub const DEGRADED_SCORE: u8 = 70;
pub const DEGRADED_SUMMARY_PREFIX: &str =
    "Could not parse specific details from AI response. Raw response: ";
const RAW_EXCERPT_CHARS: usize = 100;

/// Locates the brace-delimited block in `text` and deserializes it.
/// Returns `None` when there is no block or it does not parse as `T`.
pub fn try_parse_embedded_json<T: DeserializeOwned>(text: &str) -> Option<T> {
    let block = EMBEDDED_OBJECT.find(text)?;
    serde_json::from_str(block.as_str()).ok()
}

/// Extracts an evaluation from raw model text. `Ok` holds the parsed fields,
/// `Err` the degraded placeholder; both are complete results.
pub fn extract_evaluation(text: &str) -> Result<EvaluationResult, EvaluationResult> {
    match try_parse_embedded_json::<RawEvaluation>(text) {
        Some(raw) => Ok(raw.into_result()),
        None => Err(degraded_result(text)),
    }
}

fn degraded_result(text: &str) -> EvaluationResult {
    let excerpt: String = text.chars().take(RAW_EXCERPT_CHARS).collect();
    EvaluationResult {
        score: DEGRADED_SCORE,
        summary: format!("{DEGRADED_SUMMARY_PREFIX}{excerpt}..."),
        strengths: vec!["Technical potential".to_string()],
        weaknesses: vec!["Parsing error caught".to_string()],
        recommendations: vec!["Review raw output".to_string()],
    }
}
