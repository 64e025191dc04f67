use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_SCORE: u8 = 50;
pub const DEFAULT_SUMMARY: &str = "No summary available";

/// One evaluation call. Built per invocation and never persisted.
#[derive(Debug, Clone, Default)]
pub struct EvaluationRequest {
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub job_requirements: Option<Vec<String>>,
    /// Sent verbatim instead of the generated prompt when present.
    pub raw_prompt: Option<String>,
}

impl EvaluationRequest {
    pub fn new(skills: Vec<String>, experience_years: u32) -> Self {
        Self {
            skills,
            experience_years,
            ..Default::default()
        }
    }

    pub fn with_job_requirements(mut self, requirements: Vec<String>) -> Self {
        self.job_requirements = Some(requirements);
        self
    }
}

/// The evaluation bundle attached to a candidate. Every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: u8,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Model output as it arrives: any field may be missing or oddly typed.
#[derive(Debug, Default, Deserialize)]
pub struct RawEvaluation {
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub weaknesses: Option<Vec<String>>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
}

impl RawEvaluation {
    /// Substitutes defaults for missing fields and clamps the score.
    pub fn into_result(self) -> EvaluationResult {
        EvaluationResult {
            score: self.score.as_ref().and_then(score_from_value).unwrap_or(DEFAULT_SCORE),
            summary: self
                .summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            strengths: self.strengths.unwrap_or_default(),
            weaknesses: self.weaknesses.unwrap_or_default(),
            recommendations: self.recommendations.unwrap_or_default(),
        }
    }
}

/// Accepts `85`, `85.4` or `"85"`; anything else counts as missing.
fn score_from_value(value: &Value) -> Option<u8> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    Some(n.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_get_defaults() {
        let result = RawEvaluation::default().into_result();
        assert_eq!(result.score, DEFAULT_SCORE);
        assert_eq!(result.summary, DEFAULT_SUMMARY);
        assert!(result.strengths.is_empty());
        assert!(result.weaknesses.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_score_is_clamped() {
        let high = RawEvaluation {
            score: Some(json!(140)),
            ..Default::default()
        };
        assert_eq!(high.into_result().score, 100);

        let low = RawEvaluation {
            score: Some(json!(-3)),
            ..Default::default()
        };
        assert_eq!(low.into_result().score, 0);
    }

    #[test]
    fn test_zero_score_is_kept() {
        let raw = RawEvaluation {
            score: Some(json!(0)),
            ..Default::default()
        };
        assert_eq!(raw.into_result().score, 0);
    }

    #[test]
    fn test_string_and_float_scores() {
        assert_eq!(score_from_value(&json!("72")), Some(72));
        assert_eq!(score_from_value(&json!(64.6)), Some(65));
        assert_eq!(score_from_value(&json!("high")), None);
        assert_eq!(score_from_value(&json!(null)), None);
    }
}
