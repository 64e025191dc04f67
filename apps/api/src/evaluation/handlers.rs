//! Axum route handlers for the standalone Evaluation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::candidates::requests::required;
use crate::errors::{ApiJson, AppError};
use crate::evaluation::questions::{generate_interview_questions, InterviewQuestion};
use crate::evaluation::{EvaluationRequest, EvaluationResult};
use crate::models::{comma_list, optional_comma_list, years};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateSkillsRequest {
    #[serde(default, deserialize_with = "comma_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "years")]
    pub experience: u32,
    #[serde(
        default,
        alias = "jobRequirements",
        deserialize_with = "optional_comma_list"
    )]
    pub job_requirements: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    #[serde(default, deserialize_with = "comma_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "years")]
    pub experience: u32,
    #[serde(default, alias = "jobTitle")]
    pub job_title: String,
}

/// POST /api/evaluations/skills
///
/// Evaluates an ad-hoc profile without touching any candidate record.
pub async fn handle_evaluate_skills(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EvaluateSkillsRequest>,
) -> Json<EvaluationResult> {
    let evaluation_request = EvaluationRequest {
        skills: request.skills,
        experience_years: request.experience,
        job_requirements: request.job_requirements,
        raw_prompt: None,
    };
    Json(state.evaluator.evaluate(&evaluation_request).await)
}

/// POST /api/evaluations/questions
pub async fn handle_questions(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<QuestionsRequest>,
) -> Result<Json<Vec<InterviewQuestion>>, AppError> {
    let job_title = required("job_title", request.job_title)?;
    let questions = generate_interview_questions(
        &state.evaluator,
        &job_title,
        &request.skills,
        request.experience,
    )
    .await;
    Ok(Json(questions))
}
