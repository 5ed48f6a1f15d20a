//! Resolves a bearer token into the user it was issued for.

use std::sync::Arc;

use tracing::debug;

use notehub_auth::TokenService;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_database::UserStore;
use notehub_entity::User;

/// The trust boundary in front of every protected operation.
#[derive(Debug, Clone)]
pub struct Authenticator {
    tokens: Arc<TokenService>,
    store: Arc<dyn UserStore>,
}

impl Authenticator {
    /// Creates a new authenticator.
    pub fn new(tokens: Arc<TokenService>, store: Arc<dyn UserStore>) -> Self {
        Self { tokens, store }
    }

    /// Verifies an access token and loads its subject.
    ///
    /// Any verification failure, a non-UUID subject, or a subject that no
    /// longer exists all yield `Unauthorized`. Store outages propagate
    /// unchanged so they are not mistaken for bad credentials.
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.tokens.verify_access_token(token).map_err(|e| {
            debug!(reason = %e.message, "Rejected bearer token");
            AppError::unauthorized("Could not validate credentials")
        })?;

        let user_id = claims.user_id().map_err(|e| {
            debug!(reason = %e.message, "Rejected bearer token subject");
            AppError::unauthorized("Could not validate credentials")
        })?;

        self.store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| {
                debug!(user_id = %user_id, "Token subject no longer exists");
                AppError::unauthorized("Could not validate credentials")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use notehub_auth::TokenKind;
    use notehub_core::config::{AuthConfig, DeploymentMode};
    use notehub_core::error::ErrorKind;
    use notehub_database::MemoryUserStore;
    use notehub_entity::CreateUser;

    fn setup() -> (Authenticator, Arc<TokenService>, Arc<MemoryUserStore>) {
        let tokens = Arc::new(
            TokenService::new(&AuthConfig {
                mode: DeploymentMode::Test,
                ..AuthConfig::default()
            })
            .unwrap(),
        );
        let store = Arc::new(MemoryUserStore::new());
        (Authenticator::new(tokens.clone(), store.clone()), tokens, store)
    }

    async fn create_user(store: &MemoryUserStore) -> User {
        store
            .create_user(&CreateUser {
                email: "ada@example.com".to_string(),
                name: "Ada Lovelace".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_access_token_resolves_user() {
        let (auth, tokens, store) = setup();
        let user = create_user(&store).await;
        let token = tokens.issue_access_token(&user.id.to_string()).unwrap();

        assert_eq!(auth.authenticate(&token).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_refresh_token_is_not_accepted() {
        let (auth, tokens, store) = setup();
        let user = create_user(&store).await;
        let token = tokens.issue_refresh_token(&user.id.to_string()).unwrap();

        let err = auth.authenticate(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_expired_and_garbage_tokens() {
        let (auth, tokens, store) = setup();
        let user = create_user(&store).await;
        let expired = tokens
            .issue_at(
                &user.id.to_string(),
                TokenKind::Access,
                Utc::now() - Duration::minutes(121),
            )
            .unwrap();

        assert_eq!(
            auth.authenticate(&expired).await.unwrap_err().kind,
            ErrorKind::Unauthorized
        );
        assert_eq!(
            auth.authenticate("garbage").await.unwrap_err().kind,
            ErrorKind::Unauthorized
        );
    }

    #[tokio::test]
    async fn test_non_uuid_subject_rejected() {
        let (auth, tokens, _) = setup();
        let token = tokens.issue_access_token("not-a-user-id").unwrap();
        assert_eq!(
            auth.authenticate(&token).await.unwrap_err().kind,
            ErrorKind::Unauthorized
        );
    }

    #[tokio::test]
    async fn test_deleted_user_rejected() {
        let (auth, tokens, store) = setup();
        let user = create_user(&store).await;
        let token = tokens.issue_access_token(&user.id.to_string()).unwrap();

        store.delete_user(user.id).await.unwrap();

        assert_eq!(
            auth.authenticate(&token).await.unwrap_err().kind,
            ErrorKind::Unauthorized
        );
    }
}
