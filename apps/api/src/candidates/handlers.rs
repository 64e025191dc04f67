//! Axum route handlers for the Candidate API.

use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates::requests::{
    ContactRequest, CreateCandidateRequest, EvaluateQuery, ListCandidatesQuery,
    UpdateCandidateRequest,
};
use crate::dashboard::DashboardEvent;
use crate::errors::{ApiJson, AppError};
use crate::evaluation::{EvaluationRequest, EvaluationResult};
use crate::models::candidate::{CandidateRow, CandidateStatus, ResumeFile};
use crate::state::AppState;
use crate::store::CandidatePatch;

const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// GET /api/candidates
pub async fn handle_list(
    State(state): State<AppState>,
    Query(query): Query<ListCandidatesQuery>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let candidates = state.candidates.list(&query.into_filter()).await?;
    Ok(Json(candidates))
}

/// GET /api/candidates/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    let candidate = state
        .candidates
        .get(id)
        .await?
        .ok_or_else(|| AppError::candidate_not_found(id))?;
    Ok(Json(candidate))
}

/// POST /api/candidates
pub async fn handle_create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCandidateRequest>,
) -> Result<(StatusCode, Json<CandidateRow>), AppError> {
    let candidate = state.candidates.create(request.validate()?).await?;
    state
        .broadcaster
        .publish(DashboardEvent::CandidateAdded(candidate.clone()));
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// PUT /api/candidates/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateCandidateRequest>,
) -> Result<Json<CandidateRow>, AppError> {
    let candidate = state
        .candidates
        .update(id, request.validate()?)
        .await?
        .ok_or_else(|| AppError::candidate_not_found(id))?;
    state
        .broadcaster
        .publish(DashboardEvent::CandidateUpdated(candidate.clone()));
    Ok(Json(candidate))
}

/// DELETE /api/candidates/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.candidates.delete(id).await? {
        return Err(AppError::candidate_not_found(id));
    }
    state.broadcaster.publish(DashboardEvent::CandidateDeleted(id));
    Ok(MessageResponse::new("Candidate removed"))
}

/// POST /api/candidates/:id/resume
///
/// Multipart upload; the `resume` field is stored in S3 and its location
/// recorded on the candidate.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    if state.candidates.get(id).await?.is_none() {
        return Err(AppError::candidate_not_found(id));
    }

    let mut upload: Option<(String, Option<String>, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(sanitize_filename)
            .unwrap_or_else(|| "resume".to_string());
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
        upload = Some((filename, content_type, data));
        break;
    }

    let Some((filename, content_type, data)) = upload.filter(|(_, _, d)| !d.is_empty()) else {
        return Err(AppError::Validation("No file uploaded".to_string()));
    };

    let uploaded_at = Utc::now();
    let s3_key = format!(
        "resumes/{id}/{}-{filename}",
        uploaded_at.timestamp_millis()
    );

    state
        .s3
        .put_object()
        .bucket(&state.s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(data))
        .content_type(content_type.unwrap_or_else(|| "application/octet-stream".to_string()))
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Resume upload failed: {e}")))?;

    info!("Stored resume for candidate {id} at {s3_key}");

    let resume = ResumeFile {
        filename,
        s3_key,
        uploaded_at,
    };
    state
        .candidates
        .save_resume(id, &resume)
        .await?
        .ok_or_else(|| AppError::candidate_not_found(id))?;

    Ok(MessageResponse::new("Resume uploaded successfully"))
}

/// POST /api/candidates/:id/evaluate
///
/// Runs the evaluation pipeline on the candidate's skills and experience and
/// overwrites the stored evaluation. Model failures still produce a result.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<EvaluateQuery>,
) -> Result<Json<EvaluationResult>, AppError> {
    let candidate = state
        .candidates
        .get(id)
        .await?
        .ok_or_else(|| AppError::candidate_not_found(id))?;

    let mut request = EvaluationRequest::new(candidate.skills.clone(), candidate.experience_years());
    if let Some(job_id) = query.job_id {
        let job = state
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| AppError::job_not_found(job_id))?;
        request = request.with_job_requirements(job.requirements);
    }

    let evaluation = state.evaluator.evaluate(&request).await;

    let updated = state
        .candidates
        .save_evaluation(id, &evaluation)
        .await?
        .ok_or_else(|| AppError::candidate_not_found(id))?;
    state
        .broadcaster
        .publish(DashboardEvent::CandidateEvaluated(updated));

    Ok(Json(evaluation))
}

/// POST /api/candidates/:id/contact
pub async fn handle_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let request = request.validate()?;
    let candidate = state
        .candidates
        .get(id)
        .await?
        .ok_or_else(|| AppError::candidate_not_found(id))?;

    let message = match &state.mailer {
        Some(mailer) => {
            mailer
                .send(&candidate.email, &request.subject, &request.message)
                .await
                .map_err(|e| AppError::Mail(e.to_string()))?;
            "Email sent successfully"
        }
        None => {
            warn!("SMTP not configured, marking candidate {id} contacted without sending");
            "Candidate marked as contacted; email delivery is not configured"
        }
    };

    let patch = CandidatePatch {
        status: Some(CandidateStatus::Contacted.as_str().to_string()),
        ..Default::default()
    };
    let updated = state
        .candidates
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::candidate_not_found(id))?;
    state
        .broadcaster
        .publish(DashboardEvent::CandidateContacted(updated));

    Ok(MessageResponse::new(message))
}

/// Keeps the last path segment and replaces anything outside a safe set.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Ada Lovelace CV.pdf"), "Ada_Lovelace_CV.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\cv.docx"), "cv.docx");
        assert_eq!(sanitize_filename(".."), "resume");
    }
}
