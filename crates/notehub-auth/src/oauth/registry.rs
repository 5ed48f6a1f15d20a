//! Immutable name → provider mapping built once at startup.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;

use super::google::GoogleProvider;
use super::mock::MockProvider;
use super::provider::OAuthProvider;

/// Lookup table of configured login providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn OAuthProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers providers according to configuration.
    ///
    /// Google is added when `oauth.google` is configured; the mock provider
    /// is added unless disabled (it is off by default in production).
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let mut registry = Self::new();

        if let Some(google) = &config.oauth.google {
            registry = registry.with_provider(GoogleProvider::new(google, &config.oauth)?);
        }

        if config.oauth.mock_provider_enabled(config.auth.mode) {
            if config.auth.mode.is_production() {
                return Err(AppError::configuration(
                    "The mock OAuth provider cannot be enabled in production mode",
                ));
            }
            registry = registry.with_provider(MockProvider::new());
        }

        info!(providers = ?registry.names(), "OAuth provider registry built");
        Ok(registry)
    }

    /// Adds a provider under its own name, replacing any previous entry.
    #[must_use]
    pub fn with_provider<P: OAuthProvider>(mut self, provider: P) -> Self {
        self.providers
            .insert(provider.name().to_string(), Arc::new(provider));
        self
    }

    /// Resolves a provider, failing with `UnsupportedProvider` for unknown names.
    pub fn get(&self, name: &str) -> AppResult<Arc<dyn OAuthProvider>> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::unsupported_provider(name))
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns `true` when no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
