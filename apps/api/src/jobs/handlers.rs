//! Axum route handlers for the Job API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::candidates::handlers::MessageResponse;
use crate::errors::{ApiJson, AppError};
use crate::jobs::requests::{CreateJobRequest, UpdateJobRequest};
use crate::models::job::JobRow;
use crate::state::AppState;

/// GET /api/jobs
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(state.jobs.list().await?))
}

/// GET /api/jobs/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = state
        .jobs
        .get(id)
        .await?
        .ok_or_else(|| AppError::job_not_found(id))?;
    Ok(Json(job))
}

/// POST /api/jobs
pub async fn handle_create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let job = state.jobs.create(request.validate()?).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/jobs/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    let job = state
        .jobs
        .update(id, request.validate()?)
        .await?
        .ok_or_else(|| AppError::job_not_found(id))?;
    Ok(Json(job))
}

/// DELETE /api/jobs/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.jobs.delete(id).await? {
        return Err(AppError::job_not_found(id));
    }
    Ok(Json(MessageResponse {
        message: "Job removed".to_string(),
    }))
}
