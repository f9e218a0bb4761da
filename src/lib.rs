pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    application_service::ApplicationService,
    application_store::{ApplicationStore, PgApplicationStore},
    auth_service::AuthClient,
    job_service::JobService,
    message_bus::{DisabledMessageBus, HttpMessageBus, MessageBus},
    publisher::EventPublisher,
};
use sqlx::PgPool;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub application_service: ApplicationService,
    pub job_service: JobService,
    pub auth_client: AuthClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Result<Self> {
        let bus: Arc<dyn MessageBus> = match &config.message_bus_url {
            Some(url) => {
                info!("Publishing events through {}", url);
                Arc::new(HttpMessageBus::new(url.clone(), config.request_timeout())?)
            }
            None => {
                info!("MESSAGE_BUS_URL not set, event publishing disabled");
                Arc::new(DisabledMessageBus)
            }
        };
        let store: Arc<dyn ApplicationStore> = Arc::new(PgApplicationStore::new(pool.clone()));
        let auth_client = AuthClient::new(config.auth_service_url.clone(), config.request_timeout())?;

        Ok(Self::from_parts(pool, store, bus, auth_client, config))
    }

    /// Assembles the state from already-built collaborators.
    pub fn from_parts(
        pool: PgPool,
        store: Arc<dyn ApplicationStore>,
        bus: Arc<dyn MessageBus>,
        auth_client: AuthClient,
        config: &Config,
    ) -> Self {
        let publisher = EventPublisher::new(
            bus,
            config.application_topic.clone(),
            config.job_topic.clone(),
        );
        let application_service =
            ApplicationService::new(store, publisher.clone(), config.request_timeout());
        let job_service = JobService::new(pool.clone(), publisher);

        Self {
            pool,
            application_service,
            job_service,
            auth_client,
        }
    }
}
