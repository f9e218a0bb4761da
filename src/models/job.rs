use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const JOB_STATUS_OPEN: &str = "open";
pub const JOB_STATUS_CLOSED: &str = "closed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn days_posted_ago(&self) -> i64 {
        crate::utils::time::days_since(self.posted_date)
    }

    /// Skills are stored as one comma-separated column; every segment is kept.
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(|s| s.trim().to_string())
            .collect()
    }
}
