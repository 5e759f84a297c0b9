use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Auth4FlowConfig;

/// Client-side interface to the Forge4Flow authorization service.
///
/// The gate depends on this trait rather than on a concrete client so tests
/// can substitute stubs and servers can swap in alternate backends. The
/// handle is stateless and safe to share across concurrent requests.
#[async_trait]
pub trait Auth4FlowApi: Send + Sync {
    /// Exchange a session token for the user identifier it belongs to.
    /// Fails if the token is invalid or expired.
    async fn verify_session(&self, session_token: &str) -> Result<String>;

    /// Ask whether the subject holds the named permission.
    async fn has_permission(&self, check: &PermissionCheck) -> Result<bool>;
}

/// Subject of a permission check
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub object_type: String,
    pub object_id: String,
}

impl Subject {
    /// A user subject, the only object type the session gate checks
    pub fn user(object_id: impl Into<String>) -> Self {
        Self {
            object_type: "user".to_string(),
            object_id: object_id.into(),
        }
    }
}

/// Permission-check request payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheck {
    pub permission_id: String,
    pub subject: Subject,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifySessionRequest<'a> {
    session_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifySessionResponse {
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    result: bool,
}

/// HTTP client for the Forge4Flow API
pub struct Forge4FlowClient {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl Forge4FlowClient {
    /// Create a new client from connection settings
    pub fn new(config: Auth4FlowConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            client,
        })
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.endpoint, path);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("ApiKey {}", self.api_key))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Forge4Flow API error {}: {}", status, body);
        }

        Ok(response)
    }
}

#[async_trait]
impl Auth4FlowApi for Forge4FlowClient {
    async fn verify_session(&self, session_token: &str) -> Result<String> {
        let response = self
            .post("/v1/session/verify", &VerifySessionRequest { session_token })
            .await?;

        let verified: VerifySessionResponse = response
            .json()
            .await
            .context("Failed to parse session verification response")?;

        Ok(verified.user_id)
    }

    async fn has_permission(&self, check: &PermissionCheck) -> Result<bool> {
        let response = self.post("/v1/permissions/check", check).await?;

        let checked: CheckResponse = response
            .json()
            .await
            .context("Failed to parse permission check response")?;

        Ok(checked.result)
    }
}
