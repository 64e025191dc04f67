use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub experience: i32,
    pub salary: Option<Json<Salary>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub min: Option<i64>,
    pub max: Option<i64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    #[default]
    Draft,
    Published,
    Closed,
    OnHold,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Published => "published",
            JobStatus::Closed => "closed",
            JobStatus::OnHold => "on-hold",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_wire_names() {
        assert_eq!(serde_json::to_value(JobType::PartTime).unwrap(), "part-time");
        assert_eq!(serde_json::to_value(JobStatus::OnHold).unwrap(), "on-hold");
        assert_eq!(JobStatus::OnHold.as_str(), "on-hold");
    }

    #[test]
    fn test_salary_currency_defaults_to_usd() {
        let salary: Salary = serde_json::from_str(r#"{"min": 90000, "max": 120000}"#).unwrap();
        assert_eq!(salary.currency, "USD");
    }
}
