//! Session token and deployment-mode configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;

/// Signing secret used when none is configured outside production.
pub const DEVELOPMENT_JWT_SECRET: &str = "notehub-development-secret-do-not-deploy";

/// Deployment mode selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    /// Real deployment; no fallbacks or test doubles allowed.
    Production,
    /// Local development.
    #[default]
    Development,
    /// Automated test runs.
    Test,
}

impl DeploymentMode {
    /// Returns `true` for [`DeploymentMode::Production`].
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Authentication and session token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Deployment mode.
    #[serde(default)]
    pub mode: DeploymentMode,
    /// Secret key for token signing. Required in production.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// HMAC signing algorithm name (`HS256`, `HS384`, or `HS512`).
    #[serde(default = "default_algorithm")]
    pub jwt_algorithm: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token lifetime in minutes.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: DeploymentMode::default(),
            jwt_secret: None,
            jwt_algorithm: default_algorithm(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_minutes: default_refresh_ttl(),
        }
    }
}

impl AuthConfig {
    /// Returns the signing secret to use.
    ///
    /// Falls back to [`DEVELOPMENT_JWT_SECRET`] outside production and
    /// fails in production when no explicit secret is set.
    pub fn resolve_secret(&self) -> Result<&str, AppError> {
        match self.jwt_secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => Ok(secret),
            _ if self.mode.is_production() => Err(AppError::configuration(
                "auth.jwt_secret must be set in production mode",
            )),
            _ => {
                warn!(mode = ?self.mode, "No jwt_secret configured, using development fallback");
                Ok(DEVELOPMENT_JWT_SECRET)
            }
        }
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_ttl() -> u64 {
    120
}

fn default_refresh_ttl() -> u64 {
    60 * 24 * 30
}
