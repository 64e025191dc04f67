//! Request schemas for the candidate API, validated before any store call.

use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateSource, CandidateStatus};
use crate::models::{comma_list, optional_comma_list, optional_years, years};
use crate::store::{CandidateFilter, CandidatePatch, NewCandidate};

#[derive(Debug, Deserialize)]
pub struct ListCandidatesQuery {
    pub status: Option<CandidateStatus>,
    /// Comma-separated; matches any.
    pub skills: Option<String>,
    /// Minimum years of experience.
    #[serde(default, deserialize_with = "optional_years")]
    pub experience: Option<u32>,
}

impl ListCandidatesQuery {
    pub fn into_filter(self) -> CandidateFilter {
        CandidateFilter {
            status: self.status.map(|s| s.as_str().to_string()),
            skills: self
                .skills
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            min_experience: self.experience.map(years_to_i32),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "comma_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "years")]
    pub experience: u32,
    #[serde(default)]
    pub source: CandidateSource,
}

impl CreateCandidateRequest {
    pub fn validate(self) -> Result<NewCandidate, AppError> {
        let name = required("name", self.name)?;
        let email = validate_email(self.email)?;
        Ok(NewCandidate {
            name,
            email,
            phone: non_blank(self.phone),
            location: non_blank(self.location),
            skills: self.skills,
            experience: years_to_i32(self.experience),
            source: self.source.as_str().to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCandidateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "optional_comma_list")]
    pub skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "optional_years")]
    pub experience: Option<u32>,
    pub status: Option<CandidateStatus>,
    pub notes: Option<String>,
}

impl UpdateCandidateRequest {
    /// Blank strings count as "not provided", as the edit form sends them.
    pub fn validate(self) -> Result<CandidatePatch, AppError> {
        Ok(CandidatePatch {
            name: non_blank(self.name),
            email: non_blank(self.email).map(validate_email).transpose()?,
            phone: non_blank(self.phone),
            location: non_blank(self.location),
            skills: self.skills,
            experience: self.experience.map(years_to_i32),
            status: self.status.map(|s| s.as_str().to_string()),
            notes: non_blank(self.notes),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EvaluateQuery {
    /// Include this job's requirements in the prompt.
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            subject: required("subject", self.subject)?,
            message: required("message", self.message)?,
        })
    }
}

pub(crate) fn required(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn years_to_i32(years: u32) -> i32 {
    i32::try_from(years).unwrap_or(i32::MAX)
}

fn validate_email(email: String) -> Result<String, AppError> {
    let email = required("email", email)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            Ok(email.to_lowercase())
        }
        _ => Err(AppError::Validation(format!("'{email}' is not a valid email"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(json: &str) -> Result<NewCandidate, AppError> {
        serde_json::from_str::<CreateCandidateRequest>(json)
            .unwrap()
            .validate()
    }

    #[test]
    fn test_create_applies_defaults() {
        let new = create(r#"{"name": "Ada", "email": "Ada@Example.com"}"#).unwrap();
        assert_eq!(new.email, "ada@example.com");
        assert_eq!(new.experience, 0);
        assert_eq!(new.source, "application");
        assert!(new.skills.is_empty());
    }

    #[test]
    fn test_create_accepts_comma_skills() {
        let new = create(r#"{"name": "Ada", "email": "a@b.io", "skills": "Rust, Go"}"#).unwrap();
        assert_eq!(new.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_create_rejects_blank_name_and_bad_email() {
        assert!(matches!(
            create(r#"{"name": "  ", "email": "a@b.io"}"#),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            create(r#"{"name": "Ada", "email": "nope"}"#),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_experience_is_rejected_at_parse() {
        let parsed = serde_json::from_str::<CreateCandidateRequest>(
            r#"{"name": "Ada", "email": "a@b.io", "experience": -1}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_create_tolerates_blank_experience_and_null_skills() {
        let new = create(
            r#"{"name": "Ada", "email": "a@b.io", "experience": "", "skills": null}"#,
        )
        .unwrap();
        assert_eq!(new.experience, 0);
        assert!(new.skills.is_empty());

        let new = create(r#"{"name": "Ada", "email": "a@b.io", "experience": "4"}"#).unwrap();
        assert_eq!(new.experience, 4);
    }

    #[test]
    fn test_update_blank_experience_keeps_stored_value() {
        let patch = serde_json::from_str::<UpdateCandidateRequest>(r#"{"experience": ""}"#)
            .unwrap()
            .validate()
            .unwrap();
        assert!(patch.experience.is_none());
    }

    #[test]
    fn test_update_ignores_blank_fields() {
        let patch = UpdateCandidateRequest {
            name: Some("".into()),
            notes: Some("  strong referral ".into()),
            status: Some(CandidateStatus::Screened),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.notes.as_deref(), Some("strong referral"));
        assert_eq!(patch.status.as_deref(), Some("screened"));
    }

    #[test]
    fn test_list_query_builds_filter() {
        let filter = ListCandidatesQuery {
            status: Some(CandidateStatus::Hired),
            skills: Some("React, ,Vue".into()),
            experience: Some(3),
        }
        .into_filter();
        assert_eq!(filter.status.as_deref(), Some("hired"));
        assert_eq!(filter.skills, vec!["React", "Vue"]);
        assert_eq!(filter.min_experience, Some(3));
    }

    #[test]
    fn test_contact_requires_subject_and_message() {
        let req = ContactRequest {
            subject: "Hello".into(),
            message: " ".into(),
        };
        assert!(req.validate().is_err());
    }
}
