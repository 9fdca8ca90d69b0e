//! Auth bootstrap payloads.

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Configuration returned by the unauthenticated bootstrap endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuthConfig {
    /// Where the auth client library is served from
    #[serde(rename = "auth-client-library-url", default)]
    pub client_library_url: String,

    /// Client configuration, itself a JSON document encoded as a string
    #[serde(rename = "auth-client-config", default)]
    pub client_config: String,
}

impl AuthConfig {
    /// Parse the embedded client configuration.
    pub fn client_config_json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.client_config).map_err(|e| DashboardError::AuthInit {
            message: format!("invalid auth-client-config: {e}"),
        })
    }
}

/// Identity of the logged in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserInfo {
    pub preferred_username: String,
}
