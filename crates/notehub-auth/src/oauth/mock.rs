//! Deterministic provider for tests and local development.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;

use super::provider::{AuthorizationRequest, IdentityClaims, OAuthProvider};
use super::state::generate_state;

/// Registry name of the mock provider.
pub const MOCK_PROVIDER_NAME: &str = "test";

/// The only authorization code the mock provider accepts.
pub const MOCK_VALID_CODE: &str = "test-code";

const MOCK_AUTHORIZATION_URL: &str = "http://example.com/auth";

/// Test double that accepts exactly [`MOCK_VALID_CODE`].
///
/// The identity is seeded once per instance. The valid code can be
/// exchanged a single time; any replay fails like a real provider would.
#[derive(Debug)]
pub struct MockProvider {
    identity: IdentityClaims,
    redeemed: AtomicBool,
}

impl MockProvider {
    /// Creates a provider with a freshly randomized identity.
    pub fn new() -> Self {
        Self::with_identity(IdentityClaims::new(
            format!("testuser{}@example.com", Uuid::new_v4()),
            format!("Test User {}", Uuid::new_v4()),
        ))
    }

    /// Creates a provider that always returns `identity`.
    pub fn with_identity(identity: IdentityClaims) -> Self {
        Self {
            identity,
            redeemed: AtomicBool::new(false),
        }
    }

    /// The identity returned on a successful exchange.
    pub fn identity(&self) -> &IdentityClaims {
        &self.identity
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OAuthProvider for MockProvider {
    fn name(&self) -> &str {
        MOCK_PROVIDER_NAME
    }

    fn authorization_url(&self) -> AuthorizationRequest {
        let state = generate_state();
        AuthorizationRequest {
            url: format!("{MOCK_AUTHORIZATION_URL}?provider={MOCK_PROVIDER_NAME}&state={state}"),
            state,
        }
    }

    async fn exchange_code(&self, code: &str) -> AppResult<IdentityClaims> {
        if code != MOCK_VALID_CODE {
            debug!("Mock provider rejected unknown code");
            return Err(AppError::exchange_failed("Invalid authorization code"));
        }

        if self.redeemed.swap(true, Ordering::SeqCst) {
            warn!("Mock provider code replayed");
            return Err(AppError::exchange_failed(
                "Authorization code has already been used",
            ));
        }

        Ok(self.identity.clone())
    }
}
