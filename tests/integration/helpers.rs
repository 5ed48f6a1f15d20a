//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use notehub_api::{AppState, build_app};
use notehub_auth::{MockProvider, ProviderRegistry};
use notehub_auth::oauth::mock::MOCK_VALID_CODE;
use notehub_core::config::{AppConfig, DeploymentMode, StorageBackend};
use notehub_database::{MemoryUserStore, UserStore};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, shared when apps are built with [`TestApp::sharing_store`]
    pub store: Arc<MemoryUserStore>,
}

impl TestApp {
    /// Create a new test application with an empty store and a fresh mock provider
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryUserStore::new()))
    }

    /// Another app over the same store, with its own single-use mock provider
    pub fn sharing_store(other: &TestApp) -> Self {
        Self::with_store(Arc::clone(&other.store))
    }

    fn with_store(store: Arc<MemoryUserStore>) -> Self {
        let mut config = AppConfig::default();
        config.auth.mode = DeploymentMode::Test;
        config.storage.backend = StorageBackend::Memory;

        let providers = ProviderRegistry::new().with_provider(MockProvider::new());
        let dyn_store: Arc<dyn UserStore> = store.clone();
        let state = AppState::with_providers(config, dyn_store, providers)
            .expect("Failed to build app state");

        Self {
            router: build_app(state),
            store,
        }
    }

    /// Run the mock login flow and return the token response body
    pub async fn login(&self) -> Value {
        let response = self
            .request(
                "GET",
                &format!("/users/auth/test/callback?code={MOCK_VALID_CODE}"),
                None,
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.body
    }

    /// Login and return the access token
    pub async fn access_token(&self) -> String {
        self.login()
            .await
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// String field of the JSON body
    pub fn str_field(&self, key: &str) -> &str {
        self.body
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| panic!("Missing string field '{key}' in {:?}", self.body))
    }
}
