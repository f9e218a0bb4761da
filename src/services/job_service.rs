use sqlx::PgPool;
use tracing::warn;

use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{Job, JOB_STATUS_OPEN};
use crate::services::publisher::EventPublisher;

const DEFAULT_COMPANY: &str = "Engineering";
const DEFAULT_SKILLS: &str = "React, Node.js, TypeScript, AWS, MongoDB";
const DEFAULT_EXPERIENCE: &str = "5+ yrs React development, Team leadership";
const DEFAULT_SALARY_RANGE: &str = "$120,000 - $160,000";
const DEFAULT_BENEFITS: &str = "Health, Dental, Vision, 401k";

const JOB_COLUMNS: &str = "id, title, overview, description, company, skills, experience, location, status, posted_date, salary_range, recruiter_id, benefits_and_perks, created_at, updated_at";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
    publisher: EventPublisher,
}

impl JobService {
    pub fn new(pool: PgPool, publisher: EventPublisher) -> Self {
        Self { pool, publisher }
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let query = format!(
            r#"
            INSERT INTO jobs (
                title, overview, description, company, skills, experience, location,
                status, posted_date, salary_range, recruiter_id, benefits_and_perks
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                $8, COALESCE($9, NOW()), $10, $11, $12
            )
            RETURNING {}
            "#,
            JOB_COLUMNS
        );

        let job = sqlx::query_as::<_, Job>(&query)
            .bind(payload.title)
            .bind(payload.overview)
            .bind(payload.description)
            .bind(payload.company.unwrap_or_else(|| DEFAULT_COMPANY.to_string()))
            .bind(payload.skills.unwrap_or_else(|| DEFAULT_SKILLS.to_string()))
            .bind(payload.experience.unwrap_or_else(|| DEFAULT_EXPERIENCE.to_string()))
            .bind(payload.location)
            .bind(payload.status.unwrap_or_else(|| JOB_STATUS_OPEN.to_string()))
            .bind(payload.posted_date)
            .bind(payload.salary_range.unwrap_or_else(|| DEFAULT_SALARY_RANGE.to_string()))
            .bind(payload.recruiter_id)
            .bind(payload.benefits_and_perks.unwrap_or_else(|| DEFAULT_BENEFITS.to_string()))
            .fetch_one(&self.pool)
            .await?;

        if let Err(e) = self.publisher.publish_job(&job).await {
            warn!(job_id = job.id, error = %e, "Failed to publish job");
        }

        Ok(job)
    }

    pub async fn list(&self) -> Result<Vec<Job>> {
        let query = format!(
            "SELECT {} FROM jobs ORDER BY posted_date DESC, id DESC",
            JOB_COLUMNS
        );
        let jobs = sqlx::query_as::<_, Job>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Job> {
        let query = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))
    }

    pub async fn update(&self, id: i64, payload: UpdateJobPayload) -> Result<Job> {
        let query = format!(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                overview = COALESCE($3, overview),
                description = COALESCE($4, description),
                company = COALESCE($5, company),
                skills = COALESCE($6, skills),
                experience = COALESCE($7, experience),
                location = COALESCE($8, location),
                status = COALESCE($9, status),
                posted_date = COALESCE($10, posted_date),
                salary_range = COALESCE($11, salary_range),
                recruiter_id = COALESCE($12, recruiter_id),
                benefits_and_perks = COALESCE($13, benefits_and_perks),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(payload.title)
            .bind(payload.overview)
            .bind(payload.description)
            .bind(payload.company)
            .bind(payload.skills)
            .bind(payload.experience)
            .bind(payload.location)
            .bind(payload.status)
            .bind(payload.posted_date)
            .bind(payload.salary_range)
            .bind(payload.recruiter_id)
            .bind(payload.benefits_and_perks)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Job {} not found", id)));
        }
        Ok(())
    }
}
