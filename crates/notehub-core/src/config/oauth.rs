//! OAuth provider configuration.

use serde::{Deserialize, Serialize};

use super::auth::DeploymentMode;

/// OAuth client settings shared by every provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Timeout for outbound calls to provider endpoints, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Accepted clock skew when validating signed identity assertions, in seconds.
    #[serde(default = "default_clock_skew")]
    pub clock_skew_seconds: u64,
    /// Google provider settings. The provider is registered only when present.
    #[serde(default)]
    pub google: Option<GoogleOAuthConfig>,
    /// Whether to register the `test` mock provider.
    /// Unset means enabled outside production.
    #[serde(default)]
    pub enable_mock_provider: Option<bool>,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            http_timeout_seconds: default_http_timeout(),
            clock_skew_seconds: default_clock_skew(),
            google: None,
            enable_mock_provider: None,
        }
    }
}

impl OAuthConfig {
    /// Resolves whether the mock provider should be registered in `mode`.
    pub fn mock_provider_enabled(&self, mode: DeploymentMode) -> bool {
        self.enable_mock_provider.unwrap_or(!mode.is_production())
    }
}

/// Google OAuth2 / OpenID Connect client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleOAuthConfig {
    /// OAuth client ID; also the expected `aud` of ID tokens.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Redirect URI registered with Google.
    pub redirect_uri: String,
    /// Authorization endpoint.
    #[serde(default = "default_google_auth_url")]
    pub auth_url: String,
    /// Token endpoint.
    #[serde(default = "default_google_token_url")]
    pub token_url: String,
    /// JWKS endpoint with the ID-token signing keys.
    #[serde(default = "default_google_certs_url")]
    pub certs_url: String,
    /// Requested scopes.
    #[serde(default = "default_google_scopes")]
    pub scopes: Vec<String>,
}

fn default_http_timeout() -> u64 {
    10
}

fn default_clock_skew() -> u64 {
    10
}

fn default_google_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_google_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_google_certs_url() -> String {
    "https://www.googleapis.com/oauth2/v3/certs".to_string()
}

fn default_google_scopes() -> Vec<String> {
    vec![
        "https://www.googleapis.com/auth/userinfo.email".to_string(),
        "https://www.googleapis.com/auth/userinfo.profile".to_string(),
        "openid".to_string(),
    ]
}
