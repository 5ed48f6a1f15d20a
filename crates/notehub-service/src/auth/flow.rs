//! OAuth login flow: provider selection, code exchange, user upsert, and
//! token issuance.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use notehub_auth::{AuthorizationRequest, IdentityClaims, ProviderRegistry, TokenPair, TokenService};
use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_database::UserStore;
use notehub_entity::{CreateUser, UpdateUser, User};

/// Result of a completed login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The created or updated user.
    pub user: User,
    /// Freshly issued session tokens.
    pub tokens: TokenPair,
    /// `true` when this login created the user.
    pub created: bool,
}

/// Drives the authorization-code login flow.
#[derive(Debug, Clone)]
pub struct AuthFlowService {
    /// Configured login providers.
    providers: Arc<ProviderRegistry>,
    /// Session token issuer.
    tokens: Arc<TokenService>,
    /// User persistence.
    store: Arc<dyn UserStore>,
}

impl AuthFlowService {
    /// Creates a new auth flow service.
    pub fn new(
        providers: Arc<ProviderRegistry>,
        tokens: Arc<TokenService>,
        store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            providers,
            tokens,
            store,
        }
    }

    /// Returns the provider URL and a fresh `state` for a new login attempt.
    pub fn begin_login(&self, provider_name: &str) -> AppResult<AuthorizationRequest> {
        let provider = self.providers.get(provider_name)?;
        let request = provider.authorization_url();
        info!(provider = provider_name, "Login started");
        Ok(request)
    }

    /// Exchanges `code` with the provider, upserts the user, and issues tokens.
    pub async fn complete_login(&self, provider_name: &str, code: &str) -> AppResult<LoginOutcome> {
        let provider = self.providers.get(provider_name)?;

        let identity = provider.exchange_code(code).await.map_err(|e| {
            warn!(provider = provider_name, error = %e, "Code exchange failed");
            match e.kind {
                ErrorKind::ExchangeFailed => e,
                _ => AppError::with_source(
                    ErrorKind::ExchangeFailed,
                    "Failed to exchange authorization code",
                    e,
                ),
            }
        })?;

        if !identity.is_complete() {
            warn!(provider = provider_name, "Provider returned incomplete identity");
            return Err(AppError::incomplete_identity(
                "Provider did not return both an email and a name",
            ));
        }

        let (user, created) = self.upsert_user(&identity).await?;
        let tokens = self.tokens.issue_token_pair(&user.id.to_string())?;

        info!(
            provider = provider_name,
            user_id = %user.id,
            new_user = created,
            "Login completed"
        );

        Ok(LoginOutcome {
            user,
            tokens,
            created,
        })
    }

    /// Trades a valid refresh token for a new token pair.
    ///
    /// The subject must still exist; a deleted account cannot refresh.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self
            .tokens
            .verify_refresh_token(refresh_token)
            .map_err(|e| AppError::unauthorized(e.message))?;
        let user_id = claims
            .user_id()
            .map_err(|e| AppError::unauthorized(e.message))?;

        let user = self
            .store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        info!(user_id = %user.id, "Session refreshed");
        self.tokens.issue_token_pair(&user.id.to_string())
    }

    /// Creates the user for a new email, or records the login for a known one.
    ///
    /// Store failures surface as `UpsertFailed`; each store call is atomic,
    /// so a failure leaves no partially written user behind.
    async fn upsert_user(&self, identity: &IdentityClaims) -> AppResult<(User, bool)> {
        let email = identity.email.trim();
        let now = Utc::now();

        let existing = self
            .store
            .find_user_by_email(email)
            .await
            .map_err(upsert_failed)?;

        if let Some(user) = existing {
            return self.record_login(user, now).await.map(|user| (user, false));
        }

        let data = CreateUser {
            email: email.to_string(),
            name: identity.name.trim().to_string(),
        };

        match self.store.create_user(&data).await {
            Ok(user) => Ok((user, true)),
            // Another login for the same email won the race.
            Err(e) if e.kind == ErrorKind::Conflict => {
                let user = self
                    .store
                    .find_user_by_email(email)
                    .await
                    .map_err(upsert_failed)?
                    .ok_or_else(|| upsert_failed(e))?;
                self.record_login(user, now).await.map(|user| (user, false))
            }
            Err(e) => Err(upsert_failed(e)),
        }
    }

    async fn record_login(&self, user: User, now: chrono::DateTime<Utc>) -> AppResult<User> {
        self.store
            .update_user(&UpdateUser::last_login(user.id, now))
            .await
            .map_err(upsert_failed)?
            .ok_or_else(|| AppError::upsert_failed("User was removed during login"))
    }
}

fn upsert_failed(err: AppError) -> AppError {
    error!(error = %err, "Failed to persist user during login");
    AppError::with_source(ErrorKind::UpsertFailed, "Failed to save user", err)
}
