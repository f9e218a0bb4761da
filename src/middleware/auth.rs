use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::AppState;

fn action_for(method: &Method) -> &'static str {
    match method.as_str() {
        "POST" => "create_job",
        "PUT" | "PATCH" => "update_job",
        "DELETE" => "delete_job",
        _ => "read_job",
    }
}

/// Requires a `Bearer` token accepted by the authorization service for the
/// action implied by the request method. The resolved user is stored in the
/// request extensions.
pub async fn require_authorization(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing Authorization header"})),
        )
            .into_response();
    };
    let Some(token) = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
    else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid Authorization header format"})),
        )
            .into_response();
    };

    let action = action_for(req.method());
    match state.auth_client.authorize(&token, action).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => {
            tracing::warn!(action, error = %err, "Authorization failed");
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_follow_method() {
        assert_eq!(action_for(&Method::POST), "create_job");
        assert_eq!(action_for(&Method::PUT), "update_job");
        assert_eq!(action_for(&Method::DELETE), "delete_job");
    }
}
