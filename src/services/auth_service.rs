use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizedUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    pub role_id: Option<i64>,
    #[serde(default)]
    pub org: Option<Organization>,
}

/// Client for the external authorization service.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: Option<String>,
}

impl AuthClient {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.map(|url| url.trim_end_matches('/').to_string());
        match &base_url {
            Some(url) => info!("Authorization service URL: {}", url),
            None => info!("AUTH_SERVICE_URL not set, protected routes will reject requests"),
        }
        Ok(Self { client, base_url })
    }

    /// Validates `token` for `action`, then resolves the user behind it.
    pub async fn authorize(&self, token: &str, action: &str) -> Result<AuthorizedUser> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| Error::Forbidden("authorization service is not configured".to_string()))?;

        let resp = self
            .client
            .post(format!("{}/auth/validate", base_url))
            .json(&json!({ "token": token, "action": action }))
            .send()
            .await
            .map_err(|e| Error::Forbidden(format!("failed to connect to auth service: {}", e)))?;
        if resp.status() != StatusCode::OK {
            return Err(Error::Forbidden(format!(
                "auth validation failed with status: {}",
                resp.status()
            )));
        }

        let resp = self
            .client
            .get(format!("{}/auth/get_user", base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::Forbidden(format!("failed to get user details: {}", e)))?;
        if resp.status() != StatusCode::OK {
            return Err(Error::Forbidden(format!(
                "failed to get user details, status: {}",
                resp.status()
            )));
        }

        let user: AuthorizedUser = resp
            .json()
            .await
            .map_err(|e| Error::Forbidden(format!("invalid user response: {}", e)))?;
        debug!(user_id = user.id, action, "Request authorized");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_client_rejects() {
        let client = AuthClient::new(None, Duration::from_secs(1)).unwrap();
        let err = client.authorize("token", "create_job").await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[test]
    fn user_payload_tolerates_missing_org() {
        let user: AuthorizedUser = serde_json::from_str(
            r#"{"id": 3, "email": "r@example.com", "firstname": "Re", "lastname": "Cruiter", "role_id": 2}"#,
        )
        .unwrap();
        assert_eq!(user.id, 3);
        assert!(user.org.is_none());
    }
}
