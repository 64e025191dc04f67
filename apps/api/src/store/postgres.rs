use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{
    CandidateFilter, CandidatePatch, CandidateStore, JobPatch, JobStore, NewCandidate, NewJob,
};
use crate::errors::AppError;
use crate::evaluation::EvaluationResult;
use crate::models::candidate::{CandidateRow, ResumeFile};
use crate::models::job::JobRow;

/// Postgres-backed store for both record types.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps the `candidates_email_key` unique violation to a 409.
fn map_email_conflict(err: sqlx::Error, email: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::Conflict(format!("Candidate with email {email} already exists"));
        }
    }
    AppError::Database(err)
}

#[async_trait]
impl CandidateStore for PgStore {
    async fn list(&self, filter: &CandidateFilter) -> Result<Vec<CandidateRow>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT * FROM candidates
            WHERE ($1::text IS NULL OR status = $1)
              AND (cardinality($2::text[]) = 0 OR skills && $2::text[])
              AND ($3::int IS NULL OR experience >= $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.status.as_deref())
        .bind(&filter.skills)
        .bind(filter.min_experience)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<CandidateRow>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<CandidateRow>, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, candidate: NewCandidate) -> Result<CandidateRow, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            INSERT INTO candidates (name, email, phone, location, skills, experience, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(&candidate.location)
        .bind(&candidate.skills)
        .bind(candidate.experience)
        .bind(&candidate.source)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_email_conflict(e, &candidate.email))?;

        info!("Created candidate {}", row.id);
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: CandidatePatch,
    ) -> Result<Option<CandidateRow>, AppError> {
        let email = patch.email.clone().unwrap_or_default();
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            UPDATE candidates SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                location = COALESCE($5, location),
                skills = COALESCE($6, skills),
                experience = COALESCE($7, experience),
                status = COALESCE($8, status),
                notes = COALESCE($9, notes),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.phone)
        .bind(patch.location)
        .bind(patch.skills)
        .bind(patch.experience)
        .bind(patch.status)
        .bind(patch.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_email_conflict(e, &email))?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn save_evaluation(
        &self,
        id: Uuid,
        evaluation: &EvaluationResult,
    ) -> Result<Option<CandidateRow>, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            "UPDATE candidates SET evaluation = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(evaluation))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save_resume(
        &self,
        id: Uuid,
        resume: &ResumeFile,
    ) -> Result<Option<CandidateRow>, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            "UPDATE candidates SET resume = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Json(resume))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn count(&self, status: Option<&str>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM candidates WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn list(&self) -> Result<Vec<JobRow>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
        let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, job: NewJob) -> Result<JobRow, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs
                (title, company, location, job_type, description,
                 requirements, skills, experience, salary, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.skills)
        .bind(job.experience)
        .bind(job.salary.map(Json))
        .bind(&job.status)
        .fetch_one(&self.pool)
        .await?;

        info!("Created job {}", row.id);
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: JobPatch) -> Result<Option<JobRow>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                location = COALESCE($4, location),
                job_type = COALESCE($5, job_type),
                description = COALESCE($6, description),
                requirements = COALESCE($7, requirements),
                skills = COALESCE($8, skills),
                experience = COALESCE($9, experience),
                salary = COALESCE($10, salary),
                status = COALESCE($11, status),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.company)
        .bind(patch.location)
        .bind(patch.job_type)
        .bind(patch.description)
        .bind(patch.requirements)
        .bind(patch.skills)
        .bind(patch.experience)
        .bind(patch.salary.map(Json))
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, status: Option<&str>) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE ($1::text IS NULL OR status = $1)")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
