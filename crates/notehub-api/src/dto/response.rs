//! Response DTOs.

use serde::{Deserialize, Serialize};

use notehub_auth::{AuthorizationRequest, TokenPair};

/// Where to send the browser to start a login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUrlResponse {
    pub authorization_url: String,
    pub state: String,
}

impl From<AuthorizationRequest> for LoginUrlResponse {
    fn from(request: AuthorizationRequest) -> Self {
        Self {
            authorization_url: request.url,
            state: request.state,
        }
    }
}

/// Session token pair handed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Result of the store check.
    pub storage: String,
}
