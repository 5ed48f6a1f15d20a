//! The capability every login provider implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use notehub_core::result::AppResult;

/// Where to send the end user, plus the anti-CSRF state minted for this attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    /// Provider URL the client should redirect to.
    pub url: String,
    /// Fresh opaque state value.
    pub state: String,
}

/// Verified identity returned by a successful code exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Email address; empty when the provider did not supply one.
    #[serde(default)]
    pub email: String,
    /// Display name; empty when the provider did not supply one.
    #[serde(default)]
    pub name: String,
    /// Provider-specific fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IdentityClaims {
    /// Creates claims without extra fields.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Returns `true` when both email and name are present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.name.trim().is_empty()
    }
}

/// An OAuth2 authorization-code provider.
///
/// Implementations must be safe to share across concurrently handled
/// requests; the registry hands out `Arc<dyn OAuthProvider>`.
#[async_trait]
pub trait OAuthProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Registry key, e.g. `google`.
    fn name(&self) -> &str;

    /// Builds the provider URL for a new login attempt.
    fn authorization_url(&self) -> AuthorizationRequest;

    /// Exchanges a one-time authorization code for verified identity claims.
    ///
    /// Every failure, including network errors and rejected assertions, is
    /// reported as `ExchangeFailed`. Codes are never retried.
    async fn exchange_code(&self, code: &str) -> AppResult<IdentityClaims>;
}
