use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::candidate::{CandidateRow, CandidateStatus};
use crate::models::job::JobStatus;
use crate::state::AppState;

const RECENT_CANDIDATES: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub candidates: CandidateCounts,
    pub jobs: JobCounts,
}

#[derive(Debug, Serialize)]
pub struct CandidateCounts {
    pub total: i64,
    pub new: i64,
    pub contacted: i64,
    pub interviewed: i64,
    pub hired: i64,
}

#[derive(Debug, Serialize)]
pub struct JobCounts {
    pub total: i64,
    pub published: i64,
}

/// GET /api/dashboard/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let candidates = &state.candidates;
    let jobs = &state.jobs;

    Ok(Json(DashboardStats {
        candidates: CandidateCounts {
            total: candidates.count(None).await?,
            new: candidates.count(Some(CandidateStatus::New.as_str())).await?,
            contacted: candidates
                .count(Some(CandidateStatus::Contacted.as_str()))
                .await?,
            interviewed: candidates
                .count(Some(CandidateStatus::Interviewed.as_str()))
                .await?,
            hired: candidates.count(Some(CandidateStatus::Hired.as_str())).await?,
        },
        jobs: JobCounts {
            total: jobs.count(None).await?,
            published: jobs.count(Some(JobStatus::Published.as_str())).await?,
        },
    }))
}

/// GET /api/dashboard/recent-candidates
pub async fn handle_recent_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    Ok(Json(state.candidates.recent(RECENT_CANDIDATES).await?))
}
