use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::evaluation::EvaluationResult;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub experience: i32,
    pub resume: Option<Json<ResumeFile>>,
    /// Latest evaluation only; each run overwrites it.
    pub evaluation: Option<Json<EvaluationResult>>,
    pub status: String,
    pub notes: Option<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateRow {
    pub fn experience_years(&self) -> u32 {
        u32::try_from(self.experience).unwrap_or(0)
    }
}

/// Where an uploaded resume lives in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFile {
    pub filename: String,
    pub s3_key: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    #[default]
    New,
    Contacted,
    Screened,
    Interviewed,
    Offered,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::New => "new",
            CandidateStatus::Contacted => "contacted",
            CandidateStatus::Screened => "screened",
            CandidateStatus::Interviewed => "interviewed",
            CandidateStatus::Offered => "offered",
            CandidateStatus::Hired => "hired",
            CandidateStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Linkedin,
    Github,
    Referral,
    #[default]
    Application,
    Other,
}

impl CandidateSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateSource::Linkedin => "linkedin",
            CandidateSource::Github => "github",
            CandidateSource::Referral => "referral",
            CandidateSource::Application => "application",
            CandidateSource::Other => "other",
        }
    }
}
