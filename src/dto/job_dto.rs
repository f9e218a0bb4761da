use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::job::{Job, JOB_STATUS_CLOSED, JOB_STATUS_OPEN};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub overview: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub company: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    pub posted_date: Option<DateTime<Utc>>,
    pub salary_range: Option<String>,
    pub recruiter_id: Option<i64>,
    pub benefits_and_perks: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub overview: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub company: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    pub posted_date: Option<DateTime<Utc>>,
    pub salary_range: Option<String>,
    pub recruiter_id: Option<i64>,
    pub benefits_and_perks: Option<String>,
}

pub fn validate_status(status: &str) -> Result<(), validator::ValidationError> {
    match status {
        JOB_STATUS_OPEN | JOB_STATUS_CLOSED => Ok(()),
        _ => Err(validator::ValidationError::new("job_status")),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub description: String,
    pub company: String,
    pub skills: String,
    pub experience: String,
    pub location: Option<String>,
    pub status: String,
    pub posted_date: DateTime<Utc>,
    pub salary_range: String,
    pub recruiter_id: Option<i64>,
    pub benefits_and_perks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_posted_ago: Option<i64>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            overview: job.overview,
            description: job.description,
            company: job.company,
            skills: job.skills,
            experience: job.experience,
            location: job.location,
            status: job.status,
            posted_date: job.posted_date,
            salary_range: job.salary_range,
            recruiter_id: job.recruiter_id,
            benefits_and_perks: job.benefits_and_perks,
            days_posted_ago: None,
        }
    }
}

impl JobResponse {
    pub fn with_days_posted_ago(job: Job) -> Self {
        let days = job.days_posted_ago();
        Self {
            days_posted_ago: Some(days),
            ..Self::from(job)
        }
    }
}
