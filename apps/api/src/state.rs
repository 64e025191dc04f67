use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::dashboard::Broadcaster;
use crate::evaluation::Evaluator;
use crate::mailer::Mailer;
use crate::rate_limit::RateLimiter;
use crate::store::{CandidateStore, JobStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub candidates: Arc<dyn CandidateStore>,
    pub jobs: Arc<dyn JobStore>,
    pub s3: S3Client,
    pub s3_bucket: String,
    /// Evaluation pipeline over the configured text-generation backend.
    pub evaluator: Evaluator,
    /// Dashboard room. Every mutation handler publishes through this.
    pub broadcaster: Arc<dyn Broadcaster>,
    /// `None` when SMTP is not configured; contact then skips sending.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// `None` disables rate limiting (tests, local runs without Redis).
    pub rate_limiter: Option<RateLimiter>,
}
