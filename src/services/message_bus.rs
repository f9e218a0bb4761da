use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Client side of the message bus. `send` returns once the bus has accepted
/// the record or failed to.
#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn send(&self, topic: &str, payload: JsonValue) -> Result<()>;
}

const REST_PROXY_CONTENT_TYPE: &str = "application/vnd.kafka.json.v2+json";

/// Produces records through a Kafka REST proxy (`POST /topics/{topic}`).
#[derive(Clone)]
pub struct HttpMessageBus {
    client: Client,
    base_url: String,
}

impl HttpMessageBus {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Message bus enabled, REST proxy URL: {}", base_url);
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl MessageBus for HttpMessageBus {
    async fn send(&self, topic: &str, payload: JsonValue) -> Result<()> {
        let url = format!("{}/topics/{}", self.base_url, topic);
        let body = json!({ "records": [ { "value": payload } ] });

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, REST_PROXY_CONTENT_TYPE)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Publication(format!("message bus unreachable: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Publication(format!(
                "message bus rejected record for topic {}: {} {}",
                topic, status, text
            )));
        }

        debug!(topic, "Record accepted by message bus");
        Ok(())
    }
}

/// Used when no bus is configured; records are dropped.
#[derive(Clone, Default)]
pub struct DisabledMessageBus;

#[async_trait]
impl MessageBus for DisabledMessageBus {
    async fn send(&self, topic: &str, _payload: JsonValue) -> Result<()> {
        debug!(topic, "Message bus disabled, dropping record");
        Ok(())
    }
}
