use dotenvy::dotenv;
use std::env;

/// Forge4Flow connection settings loaded from environment variables
#[derive(Debug, Clone)]
pub struct Auth4FlowConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl Auth4FlowConfig {
    /// Load settings from `AUTH4FLOW_BASE_URL` and `AUTH4FLOW_API_KEY`.
    ///
    /// Missing variables are left empty rather than rejected here; a bad
    /// endpoint or key surfaces as an error from the first API call.
    pub fn from_env() -> Self {
        // Load .env file if present (development)
        let _ = dotenv();

        Self {
            endpoint: env::var("AUTH4FLOW_BASE_URL").unwrap_or_default(),
            api_key: env::var("AUTH4FLOW_API_KEY").unwrap_or_default(),
        }
    }

    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}
