use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::application::{ApplicationKey, Document, Identifier, APPLICATION_ID};
use crate::services::application_status::ensure_status;
use crate::services::application_store::ApplicationStore;
use crate::services::publisher::EventPublisher;
use crate::utils::{naming, object_id::generate_object_id, time};

/// Ingestion pipeline for applications: decode, normalize, validate, default
/// the status, persist, then republish the transport view.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn ApplicationStore>,
    publisher: EventPublisher,
    deadline: Duration,
}

impl ApplicationService {
    pub fn new(
        store: Arc<dyn ApplicationStore>,
        publisher: EventPublisher,
        deadline: Duration,
    ) -> Self {
        Self {
            store,
            publisher,
            deadline,
        }
    }

    pub async fn ensure_uniqueness_constraint(&self) -> Result<()> {
        timeout(self.deadline, self.store.ensure_uniqueness_constraint()).await?
    }

    pub async fn create_application(&self, raw_payload: &[u8]) -> Result<Document> {
        let decoded: Value = serde_json::from_slice(raw_payload)
            .map_err(|e| Error::BadPayload(format!("invalid JSON: {}", e)))?;
        let Value::Object(payload) = decoded else {
            return Err(Error::BadPayload(
                "application payload must be a JSON object".to_string(),
            ));
        };

        let application_id = supplied_application_id(&payload).unwrap_or_else(generate_object_id);
        let mut document = naming::to_storage_keys(payload);
        document.insert(APPLICATION_ID.to_string(), Value::String(application_id));
        let key = ApplicationKey::from_storage(&document)?;
        ensure_status(&mut document, time::now());

        match timeout(self.deadline, self.store.create(&document)).await? {
            Ok(()) => {}
            Err(Error::Duplicate) => {
                info!(
                    candidate_id = %key.candidate_id,
                    job_id = %key.job_id,
                    "Rejected duplicate application"
                );
                return Err(Error::Duplicate);
            }
            Err(other) => return Err(other),
        }
        info!(
            application_id = %key.application_id,
            candidate_id = %key.candidate_id,
            job_id = %key.job_id,
            "Application created"
        );

        let transport = naming::to_transport_keys(document);
        self.republish(&transport).await;
        Ok(transport)
    }

    /// Failures are logged and never reach the caller.
    async fn republish(&self, transport: &Document) {
        match timeout(self.deadline, self.publisher.publish_application(transport)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Failed to publish application"),
            Err(_) => warn!("Timed out publishing application"),
        }
    }

    pub async fn get_applications_by_job_id(&self, job_id: i64) -> Result<Vec<Document>> {
        let docs = timeout(self.deadline, self.store.get_by_job_id(&Identifier::from(job_id))).await??;
        Ok(docs.into_iter().map(naming::to_transport_keys).collect())
    }

    pub async fn get_application_by_id(&self, application_id: &str) -> Result<Option<Document>> {
        let doc = timeout(self.deadline, self.store.get_by_id(application_id)).await??;
        Ok(doc.map(naming::to_transport_keys))
    }

    pub async fn get_applications_by_candidate_id(&self, candidate_id: i64) -> Result<Vec<Document>> {
        let docs = timeout(
            self.deadline,
            self.store.get_by_candidate_id(&Identifier::from(candidate_id)),
        )
        .await??;
        Ok(docs.into_iter().map(naming::to_transport_keys).collect())
    }
}

/// First caller-supplied id among the keys that normalize to
/// `application_id`. Numbers are coerced to strings; empty strings and other
/// values count as absent.
fn supplied_application_id(payload: &Document) -> Option<String> {
    payload
        .iter()
        .filter(|(key, _)| naming::to_snake_case(key) == APPLICATION_ID)
        .find_map(|(_, value)| match value {
            Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}
