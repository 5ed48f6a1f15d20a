//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. The resulting [`AppConfig`] is built once at startup and
//! shared read-only afterwards.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod oauth;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, DeploymentMode};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::oauth::{GoogleOAuthConfig, OAuthConfig};
pub use self::storage::{StorageBackend, StorageConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session token and deployment-mode settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// OAuth provider settings.
    #[serde(default)]
    pub oauth: OAuthConfig,
    /// Persistence backend selection.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `NOTEHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("NOTEHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Run every startup check that must hold before the server accepts traffic.
    ///
    /// Production mode requires an explicit signing secret and rejects the
    /// mock provider and the in-memory store.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.resolve_secret()?;

        if self.auth.access_ttl_minutes == 0 || self.auth.refresh_ttl_minutes == 0 {
            return Err(AppError::configuration("Token lifetimes must be non-zero"));
        }

        if self.auth.mode.is_production() {
            if self.oauth.mock_provider_enabled(self.auth.mode) {
                return Err(AppError::configuration(
                    "The mock OAuth provider cannot be enabled in production mode",
                ));
            }
            if self.storage.backend == StorageBackend::Memory {
                return Err(AppError::configuration(
                    "The in-memory store cannot be used in production mode",
                ));
            }
        }

        Ok(())
    }
}
