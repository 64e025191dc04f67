use serde::Deserialize;

use crate::candidates::requests::{non_blank, required, years_to_i32};
use crate::errors::AppError;
use crate::models::job::{JobStatus, JobType, Salary};
use crate::models::{comma_list, optional_comma_list, optional_years, years};
use crate::store::{JobPatch, NewJob};

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    #[serde(rename = "type", default)]
    pub job_type: JobType,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "comma_list")]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "comma_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "years")]
    pub experience: u32,
    pub salary: Option<Salary>,
    #[serde(default)]
    pub status: JobStatus,
}

impl CreateJobRequest {
    pub fn validate(self) -> Result<NewJob, AppError> {
        if let Some(salary) = &self.salary {
            validate_salary(salary)?;
        }
        Ok(NewJob {
            title: required("title", self.title)?,
            company: required("company", self.company)?,
            location: non_blank(self.location),
            job_type: self.job_type.as_str().to_string(),
            description: non_blank(self.description),
            requirements: self.requirements,
            skills: self.skills,
            experience: years_to_i32(self.experience),
            salary: self.salary,
            status: self.status.as_str().to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_comma_list")]
    pub requirements: Option<Vec<String>>,
    #[serde(default, deserialize_with = "optional_comma_list")]
    pub skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "optional_years")]
    pub experience: Option<u32>,
    pub salary: Option<Salary>,
    pub status: Option<JobStatus>,
}

impl UpdateJobRequest {
    pub fn validate(self) -> Result<JobPatch, AppError> {
        if let Some(salary) = &self.salary {
            validate_salary(salary)?;
        }
        Ok(JobPatch {
            title: non_blank(self.title),
            company: non_blank(self.company),
            location: non_blank(self.location),
            job_type: self.job_type.map(|t| t.as_str().to_string()),
            description: non_blank(self.description),
            requirements: self.requirements,
            skills: self.skills,
            experience: self.experience.map(years_to_i32),
            salary: self.salary,
            status: self.status.map(|s| s.as_str().to_string()),
        })
    }
}

fn validate_salary(salary: &Salary) -> Result<(), AppError> {
    match (salary.min, salary.max) {
        (Some(min), _) if min < 0 => Err(AppError::Validation(
            "salary.min cannot be negative".to_string(),
        )),
        (Some(min), Some(max)) if min > max => Err(AppError::Validation(
            "salary.min cannot exceed salary.max".to_string(),
        )),
        _ => Ok(()),
    }
}
