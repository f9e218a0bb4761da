use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::application::{
    Document, Identifier, APPLICATION_ID, CANDIDATE_ID, JOB_ID, RESUME_URL,
};
use crate::models::job::Job;
use crate::services::message_bus::MessageBus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationMessage {
    pub application_id: String,
    pub job_id: String,
    pub resume_url: String,
    pub candidate_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMessage {
    pub job_id: i64,
    pub title: String,
    pub overview: String,
    pub description: String,
    pub skills: Vec<String>,
    pub experience: String,
}

impl ApplicationMessage {
    /// Reads the transport keys first and falls back to the storage keys.
    pub fn from_document(document: &Document) -> Result<Self> {
        let field = |transport: &str, storage: &str| {
            document
                .get(transport)
                .filter(|v| !v.is_null())
                .or_else(|| document.get(storage))
        };

        let application_id = field("applicationId", APPLICATION_ID)
            .and_then(Identifier::from_value)
            .ok_or_else(|| Error::Publication("applicationId is required".to_string()))?;
        let job_id = field("jobId", JOB_ID)
            .and_then(Identifier::from_value)
            .ok_or_else(|| Error::Publication("jobId is required".to_string()))?;
        let candidate_id = field("candidateId", CANDIDATE_ID)
            .and_then(Identifier::from_value)
            .ok_or_else(|| Error::Publication("candidateId is required".to_string()))?;
        let resume_url = field("resumeUrl", RESUME_URL)
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            application_id: application_id.into_string(),
            job_id: job_id.into_string(),
            resume_url,
            candidate_id: candidate_id.into_string(),
        })
    }
}

impl From<&Job> for JobMessage {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id,
            title: job.title.clone(),
            overview: job.overview.clone(),
            description: job.description.clone(),
            skills: job.skill_list(),
            experience: job.experience.clone(),
        }
    }
}

/// Turns domain objects into downstream messages and hands them to the bus.
#[derive(Clone)]
pub struct EventPublisher {
    bus: Arc<dyn MessageBus>,
    application_topic: String,
    job_topic: String,
}

impl EventPublisher {
    pub fn new(bus: Arc<dyn MessageBus>, application_topic: String, job_topic: String) -> Self {
        Self {
            bus,
            application_topic,
            job_topic,
        }
    }

    pub async fn publish_application(&self, document: &Document) -> Result<()> {
        let message = ApplicationMessage::from_document(document)?;
        let payload = serde_json::to_value(&message)
            .map_err(|e| Error::Publication(format!("failed to serialize application: {}", e)))?;

        self.bus.send(&self.application_topic, payload).await?;
        info!(
            application_id = %message.application_id,
            topic = %self.application_topic,
            "Application published"
        );
        Ok(())
    }

    pub async fn publish_job(&self, job: &Job) -> Result<()> {
        let message = JobMessage::from(job);
        let payload = serde_json::to_value(&message)
            .map_err(|e| Error::Publication(format!("failed to serialize job: {}", e)))?;

        self.bus.send(&self.job_topic, payload).await?;
        info!(job_id = job.id, topic = %self.job_topic, "Job published");
        Ok(())
    }
}
