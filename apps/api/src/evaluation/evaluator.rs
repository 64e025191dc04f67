//! The evaluation pipeline: prompt → model → extraction, with fallbacks.
//!
//! ```text
//! Start → PromptBuilt ─┬─ InvokeOK → ExtractAttempt ─┬─ ExtractOK   → Parsed
//!                      │                              └─ ExtractFail → Degraded
//!                      └─ InvokeFail ──────────────────────────────────→ Fallback
//! ```
//!
//! No branch returns an error; model failures only lower result quality.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::llm_client::prompts::RECRUITER_SYSTEM;
use crate::llm_client::TextGenerator;

use super::extract::extract_evaluation;
use super::fallback::synthesize_fallback;
use super::prompts::build_evaluation_prompt;
use super::types::{EvaluationRequest, EvaluationResult};

/// Which terminal state an evaluation reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationOutcome {
    Parsed,
    Degraded,
    Fallback,
}

impl fmt::Display for EvaluationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EvaluationOutcome::Parsed => "parsed",
            EvaluationOutcome::Degraded => "degraded",
            EvaluationOutcome::Fallback => "fallback",
        })
    }
}

#[derive(Clone)]
pub struct Evaluator {
    generator: Arc<dyn TextGenerator>,
}

impl Evaluator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Evaluates a candidate profile. Always returns a complete result.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> EvaluationResult {
        self.evaluate_with_outcome(request).await.1
    }

    pub async fn evaluate_with_outcome(
        &self,
        request: &EvaluationRequest,
    ) -> (EvaluationOutcome, EvaluationResult) {
        let (outcome, result) = match self.complete(request).await {
            Some(text) => match extract_evaluation(&text) {
                Ok(result) => (EvaluationOutcome::Parsed, result),
                Err(degraded) => {
                    warn!("Model output contained no parseable evaluation JSON");
                    (EvaluationOutcome::Degraded, degraded)
                }
            },
            None => (
                EvaluationOutcome::Fallback,
                synthesize_fallback(&request.skills, request.experience_years),
            ),
        };

        info!(
            outcome = %outcome,
            score = result.score,
            backend = %self.generator.describe(),
            "Evaluation finished"
        );
        (outcome, result)
    }

    /// Sends the request's prompt once and returns the raw text, or `None`
    /// if the backend could not produce any. Failures are logged, not raised.
    pub async fn complete(&self, request: &EvaluationRequest) -> Option<String> {
        let prompt = build_evaluation_prompt(request);
        match self.generator.generate(RECRUITER_SYSTEM, &prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(
                    backend = %self.generator.describe(),
                    error = %e,
                    "Model call failed, using fallback"
                );
                None
            }
        }
    }
}
