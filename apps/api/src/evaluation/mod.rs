// Candidate evaluation pipeline: prompt building, model invocation,
// response extraction and the deterministic fallback.
// All model calls go through llm_client; nothing here speaks HTTP.

pub mod evaluator;
pub mod extract;
pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod types;

pub use evaluator::Evaluator;
pub use types::{EvaluationRequest, EvaluationResult};
