//! In-memory store for router and handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use super::{
    CandidateFilter, CandidatePatch, CandidateStore, JobPatch, JobStore, NewCandidate, NewJob,
};
use crate::errors::AppError;
use crate::evaluation::EvaluationResult;
use crate::models::candidate::{CandidateRow, ResumeFile};
use crate::models::job::JobRow;

#[derive(Default)]
pub struct MemoryStore {
    candidates: Mutex<Vec<CandidateRow>>,
    jobs: Mutex<Vec<JobRow>>,
}

impl MemoryStore {
    /// Strictly increasing timestamps so "newest first" is deterministic.
    fn next_timestamp(len: usize) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::milliseconds(len as i64)
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn list(&self, filter: &CandidateFilter) -> Result<Vec<CandidateRow>, AppError> {
        let candidates = self.candidates.lock().unwrap();
        let mut rows: Vec<CandidateRow> = candidates
            .iter()
            .filter(|c| filter.status.as_deref().map_or(true, |s| c.status == s))
            .filter(|c| filter.skills.is_empty() || c.skills.iter().any(|s| filter.skills.contains(s)))
            .filter(|c| filter.min_experience.map_or(true, |min| c.experience >= min))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<CandidateRow>, AppError> {
        let mut rows = CandidateStore::list(self, &CandidateFilter::default()).await?;
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<CandidateRow>, AppError> {
        let candidates = self.candidates.lock().unwrap();
        Ok(candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, candidate: NewCandidate) -> Result<CandidateRow, AppError> {
        let mut candidates = self.candidates.lock().unwrap();
        if candidates.iter().any(|c| c.email == candidate.email) {
            return Err(AppError::Conflict(format!(
                "Candidate with email {} already exists",
                candidate.email
            )));
        }
        let now = Self::next_timestamp(candidates.len());
        let row = CandidateRow {
            id: Uuid::new_v4(),
            name: candidate.name,
            email: candidate.email,
            phone: candidate.phone,
            location: candidate.location,
            skills: candidate.skills,
            experience: candidate.experience,
            resume: None,
            evaluation: None,
            status: "new".to_string(),
            notes: None,
            source: candidate.source,
            created_at: now,
            updated_at: now,
        };
        candidates.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: CandidatePatch,
    ) -> Result<Option<CandidateRow>, AppError> {
        let mut candidates = self.candidates.lock().unwrap();
        if let Some(email) = &patch.email {
            if candidates.iter().any(|c| c.id != id && &c.email == email) {
                return Err(AppError::Conflict(format!(
                    "Candidate with email {email} already exists"
                )));
            }
        }
        let Some(row) = candidates.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.name {
            row.name = v;
        }
        if let Some(v) = patch.email {
            row.email = v;
        }
        if patch.phone.is_some() {
            row.phone = patch.phone;
        }
        if patch.location.is_some() {
            row.location = patch.location;
        }
        if let Some(v) = patch.skills {
            row.skills = v;
        }
        if let Some(v) = patch.experience {
            row.experience = v;
        }
        if let Some(v) = patch.status {
            row.status = v;
        }
        if patch.notes.is_some() {
            row.notes = patch.notes;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut candidates = self.candidates.lock().unwrap();
        let before = candidates.len();
        candidates.retain(|c| c.id != id);
        Ok(candidates.len() < before)
    }

    async fn save_evaluation(
        &self,
        id: Uuid,
        evaluation: &EvaluationResult,
    ) -> Result<Option<CandidateRow>, AppError> {
        let mut candidates = self.candidates.lock().unwrap();
        Ok(candidates.iter_mut().find(|c| c.id == id).map(|row| {
            row.evaluation = Some(Json(evaluation.clone()));
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn save_resume(
        &self,
        id: Uuid,
        resume: &ResumeFile,
    ) -> Result<Option<CandidateRow>, AppError> {
        let mut candidates = self.candidates.lock().unwrap();
        Ok(candidates.iter_mut().find(|c| c.id == id).map(|row| {
            row.resume = Some(Json(resume.clone()));
            row.clone()
        }))
    }

    async fn count(&self, status: Option<&str>) -> Result<i64, AppError> {
        let candidates = self.candidates.lock().unwrap();
        Ok(candidates
            .iter()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .count() as i64)
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn list(&self) -> Result<Vec<JobRow>, AppError> {
        let mut rows = self.jobs.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
        Ok(self.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned())
    }

    async fn create(&self, job: NewJob) -> Result<JobRow, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let now = Self::next_timestamp(jobs.len());
        let row = JobRow {
            id: Uuid::new_v4(),
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            description: job.description,
            requirements: job.requirements,
            skills: job.skills,
            experience: job.experience,
            salary: job.salary.map(Json),
            status: job.status,
            created_at: now,
            updated_at: now,
        };
        jobs.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: JobPatch) -> Result<Option<JobRow>, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let Some(row) = jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.title {
            row.title = v;
        }
        if let Some(v) = patch.company {
            row.company = v;
        }
        if patch.location.is_some() {
            row.location = patch.location;
        }
        if let Some(v) = patch.job_type {
            row.job_type = v;
        }
        if patch.description.is_some() {
            row.description = patch.description;
        }
        if let Some(v) = patch.requirements {
            row.requirements = v;
        }
        if let Some(v) = patch.skills {
            row.skills = v;
        }
        if let Some(v) = patch.experience {
            row.experience = v;
        }
        if let Some(v) = patch.salary {
            row.salary = Some(Json(v));
        }
        if let Some(v) = patch.status {
            row.status = v;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        Ok(jobs.len() < before)
    }

    async fn count(&self, status: Option<&str>) -> Result<i64, AppError> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs
            .iter()
            .filter(|j| status.map_or(true, |s| j.status == s))
            .count() as i64)
    }
}
