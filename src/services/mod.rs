pub mod application_service;
pub mod application_status;
pub mod application_store;
pub mod auth_service;
pub mod job_service;
pub mod message_bus;
pub mod publisher;
