//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use notehub_auth::{ProviderRegistry, TokenService};
use notehub_core::config::AppConfig;
use notehub_core::result::AppResult;
use notehub_database::UserStore;
use notehub_service::{AuthFlowService, Authenticator, NoteService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks, and none
/// of them is mutated after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// User and note persistence (Postgres or in-memory)
    pub store: Arc<dyn UserStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token issuer and verifier
    pub tokens: Arc<TokenService>,
    /// Configured OAuth providers
    pub providers: Arc<ProviderRegistry>,
    /// Bearer token → user resolution
    pub authenticator: Arc<Authenticator>,

    // ── Services ─────────────────────────────────────────────
    /// Login flow
    pub auth_flow: Arc<AuthFlowService>,
    /// Profile and account management
    pub user_service: Arc<UserService>,
    /// Note management
    pub note_service: Arc<NoteService>,
}

impl AppState {
    /// Builds the state, registering providers from configuration.
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> AppResult<Self> {
        let providers = ProviderRegistry::from_config(&config)?;
        Self::with_providers(config, store, providers)
    }

    /// Builds the state around an explicit provider registry.
    pub fn with_providers(
        config: AppConfig,
        store: Arc<dyn UserStore>,
        providers: ProviderRegistry,
    ) -> AppResult<Self> {
        let tokens = Arc::new(TokenService::new(&config.auth)?);
        let providers = Arc::new(providers);

        let authenticator = Arc::new(Authenticator::new(
            Arc::clone(&tokens),
            Arc::clone(&store),
        ));
        let auth_flow = Arc::new(AuthFlowService::new(
            Arc::clone(&providers),
            Arc::clone(&tokens),
            Arc::clone(&store),
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&store)));
        let note_service = Arc::new(NoteService::new(Arc::clone(&store)));

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens,
            providers,
            authenticator,
            auth_flow,
            user_service,
            note_service,
        })
    }
}
