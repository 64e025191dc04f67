//! Persistence boundary for candidate and job records.
//!
//! Handlers depend on these traits, carried in `AppState` as `Arc<dyn _>`.
//! `PgStore` is the production implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::EvaluationResult;
use crate::models::candidate::{CandidateRow, ResumeFile};
use crate::models::job::{JobRow, Salary};

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

/// Query filters for listing candidates. Empty fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub status: Option<String>,
    /// Matches candidates having any of these skills.
    pub skills: Vec<String>,
    pub min_experience: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub experience: i32,
    pub source: String,
}

/// Fields to overwrite; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct CandidatePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub job_type: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub experience: i32,
    pub salary: Option<Salary>,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<i32>,
    pub salary: Option<Salary>,
    pub status: Option<String>,
}

/// Mutations return `Ok(None)` when the id does not exist.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Newest first.
    async fn list(&self, filter: &CandidateFilter) -> Result<Vec<CandidateRow>, AppError>;

    async fn recent(&self, limit: i64) -> Result<Vec<CandidateRow>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<CandidateRow>, AppError>;

    /// Fails with `AppError::Conflict` when the email is already taken.
    async fn create(&self, candidate: NewCandidate) -> Result<CandidateRow, AppError>;

    async fn update(&self, id: Uuid, patch: CandidatePatch)
        -> Result<Option<CandidateRow>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Replaces any previous evaluation. Concurrent writers: last one wins.
    async fn save_evaluation(
        &self,
        id: Uuid,
        evaluation: &EvaluationResult,
    ) -> Result<Option<CandidateRow>, AppError>;

    async fn save_resume(
        &self,
        id: Uuid,
        resume: &ResumeFile,
    ) -> Result<Option<CandidateRow>, AppError>;

    async fn count(&self, status: Option<&str>) -> Result<i64, AppError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Result<Vec<JobRow>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<JobRow>, AppError>;

    async fn create(&self, job: NewJob) -> Result<JobRow, AppError>;

    async fn update(&self, id: Uuid, patch: JobPatch) -> Result<Option<JobRow>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    async fn count(&self, status: Option<&str>) -> Result<i64, AppError>;
}
