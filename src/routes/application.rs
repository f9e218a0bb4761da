use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{Map, Value};

use crate::{error::Result, AppState};

#[utoipa::path(
    post,
    path = "/applications",
    responses(
        (status = 201, description = "Application created; body is the stored document with camelCase keys"),
        (status = 400, description = "Malformed payload or missing jobId/candidateId"),
        (status = 409, description = "Candidate has already applied for this job"),
        (status = 500, description = "Storage unavailable")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let created = state.application_service.create_application(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/applications/job/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Applications for the job"),
        (status = 500, description = "Storage unavailable")
    )
)]
#[axum::debug_handler]
pub async fn get_applications_by_job_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.get_applications_by_job_id(id).await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/applications/{id}",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "The application, or an empty object when none matches")
    )
)]
#[axum::debug_handler]
pub async fn get_application_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .get_application_by_id(&id)
        .await?
        .unwrap_or_else(Map::new);
    Ok(Json(Value::Object(application)))
}

#[utoipa::path(
    get,
    path = "/applications/candidate/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Applications submitted by the candidate"),
        (status = 500, description = "Storage unavailable")
    )
)]
#[axum::debug_handler]
pub async fn get_applications_by_candidate_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .get_applications_by_candidate_id(id)
        .await?;
    Ok(Json(applications))
}
