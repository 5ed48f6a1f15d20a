//! Google OAuth2 / OpenID Connect provider.
//!
//! Login runs the authorization-code flow:
//!
//! 1. [`authorization_url`](GoogleProvider::authorization_url) builds the
//!    consent-screen URL with a fresh `state`.
//! 2. [`exchange_code`](GoogleProvider::exchange_code) posts the code to the
//!    token endpoint and receives a signed ID token.
//! 3. The ID token's RS256 signature is checked against Google's published
//!    JWKS, together with audience (our client ID), issuer, and expiry with
//!    the configured clock-skew tolerance.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use notehub_core::config::{GoogleOAuthConfig, OAuthConfig};
use notehub_core::error::AppError;
use notehub_core::result::AppResult;

use super::provider::{AuthorizationRequest, IdentityClaims, OAuthProvider};
use super::state::generate_state;

/// Registry name of the Google provider.
pub const GOOGLE_PROVIDER_NAME: &str = "google";

/// Issuer values Google puts in ID tokens.
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Subset of the token endpoint response we rely on.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    id_token: Option<String>,
}

/// Google login provider.
#[derive(Clone)]
pub struct GoogleProvider {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
    auth_url: Url,
    token_url: Url,
    certs_url: Url,
    clock_skew_seconds: u64,
    http: reqwest::Client,
}

impl std::fmt::Debug for GoogleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleProvider")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("token_url", &self.token_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GoogleProvider {
    /// Builds the provider and its HTTP client.
    ///
    /// The client gets the configured outbound timeout so a stalled Google
    /// endpoint surfaces as a failed exchange instead of a hung request.
    pub fn new(config: &GoogleOAuthConfig, oauth: &OAuthConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(oauth.http_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scopes.join(" "),
            auth_url: parse_url("auth_url", &config.auth_url)?,
            token_url: parse_url("token_url", &config.token_url)?,
            certs_url: parse_url("certs_url", &config.certs_url)?,
            clock_skew_seconds: oauth.clock_skew_seconds,
            http,
        })
    }

    /// Use a custom HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    async fn fetch_id_token(&self, code: &str) -> AppResult<String> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::exchange_failed(format!("Token request failed: {e}")))?;

        let response = ensure_success(response, "token exchange").await?;
        let body: TokenResponse = response.json().await.map_err(|e| {
            AppError::exchange_failed(format!("Malformed token response: {e}"))
        })?;

        body.id_token
            .ok_or_else(|| AppError::exchange_failed("Token response did not include an ID token"))
    }

    async fn fetch_jwks(&self) -> AppResult<JwkSet> {
        let response = self
            .http
            .get(self.certs_url.clone())
            .send()
            .await
            .map_err(|e| AppError::exchange_failed(format!("Signing key request failed: {e}")))?;

        let response = ensure_success(response, "signing key request").await?;
        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::exchange_failed(format!("Malformed signing key set: {e}")))
    }

    async fn verify_id_token(&self, id_token: &str) -> AppResult<IdentityClaims> {
        let header = decode_header(id_token)
            .map_err(|e| AppError::exchange_failed(format!("Malformed ID token: {e}")))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::exchange_failed(format!(
                "Unexpected ID token algorithm {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| AppError::exchange_failed("ID token header has no key id"))?;

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks
            .find(&kid)
            .ok_or_else(|| AppError::exchange_failed(format!("No signing key matches '{kid}'")))?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| AppError::exchange_failed(format!("Unusable signing key: {e}")))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.client_id.as_str()]);
        validation.set_issuer(&GOOGLE_ISSUERS);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.leeway = self.clock_skew_seconds;

        let data = decode::<IdentityClaims>(id_token, &key, &validation).map_err(|e| {
            AppError::exchange_failed(format!("ID token verification failed: {e}"))
        })?;

        Ok(data.claims)
    }
}

#[async_trait]
impl OAuthProvider for GoogleProvider {
    fn name(&self) -> &str {
        GOOGLE_PROVIDER_NAME
    }

    fn authorization_url(&self) -> AuthorizationRequest {
        let state = generate_state();

        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scope)
            .append_pair("state", &state)
            .append_pair("prompt", "consent");

        AuthorizationRequest {
            url: url.into(),
            state,
        }
    }

    async fn exchange_code(&self, code: &str) -> AppResult<IdentityClaims> {
        let id_token = self.fetch_id_token(code).await?;
        let claims = self.verify_id_token(&id_token).await?;
        debug!(provider = GOOGLE_PROVIDER_NAME, "Verified ID token");
        Ok(claims)
    }
}

fn parse_url(field: &str, value: &str) -> AppResult<Url> {
    Url::parse(value)
        .map_err(|e| AppError::configuration(format!("oauth.google.{field} is not a valid URL: {e}")))
}

/// Checks the HTTP status and keeps the body for the error message.
async fn ensure_success(
    response: reqwest::Response,
    operation: &'static str,
) -> AppResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::exchange_failed(format!(
        "Google {operation} returned {status}: {body}"
    )))
}
