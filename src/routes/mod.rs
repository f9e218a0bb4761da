pub mod application;
pub mod health;
pub mod job;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        application::create_application,
        application::get_applications_by_job_id,
        application::get_application_by_id,
        application::get_applications_by_candidate_id,
        job::create_job,
        job::list_jobs,
        job::get_job,
        job::update_job,
        job::delete_job,
    ),
    components(schemas(
        crate::dto::job_dto::CreateJobPayload,
        crate::dto::job_dto::UpdateJobPayload,
        crate::dto::job_dto::JobResponse,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(state: AppState) -> Router {
    let application_routes = Router::new()
        .route("/applications", post(application::create_application))
        .route(
            "/applications/job/:id",
            get(application::get_applications_by_job_id),
        )
        .route(
            "/applications/candidate/:id",
            get(application::get_applications_by_candidate_id),
        )
        .route("/applications/:id", get(application::get_application_by_id));

    let job_mutations = Router::new()
        .route("/jobs", post(job::create_job))
        .route(
            "/jobs/:id",
            axum::routing::put(job::update_job).delete(job::delete_job),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_authorization,
        ));

    let job_reads = Router::new()
        .route("/jobs", get(job::list_jobs))
        .route("/jobs/:id", get(job::get_job));

    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(application_routes)
        .merge(job_mutations)
        .merge(job_reads)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
