//! Issues and verifies signed, time-bounded session tokens.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use notehub_core::config::AuthConfig;
use notehub_core::error::AppError;

use super::claims::{Claims, TokenKind};

/// An access token plus the refresh token issued alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Creates and validates HMAC-signed session tokens.
///
/// Keys and lifetimes are fixed at construction; the service is cheap to
/// share behind an `Arc` and never mutates.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.header.alg)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenService {
    /// Builds the service from auth configuration.
    ///
    /// Fails when the secret cannot be resolved for the configured mode, the
    /// algorithm is not an HMAC variant, or a lifetime is out of range.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let secret = config.resolve_secret()?;
        let algorithm = parse_algorithm(&config.jwt_algorithm)?;

        // Expiry is checked by hand against an explicit clock.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(algorithm),
            validation,
            access_ttl: minutes(config.access_ttl_minutes)?,
            refresh_ttl: minutes(config.refresh_ttl_minutes)?,
        })
    }

    /// Lifetime of access tokens.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Lifetime of refresh tokens.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issues an access token for `subject`.
    pub fn issue_access_token(&self, subject: &str) -> Result<String, AppError> {
        self.issue_at(subject, TokenKind::Access, Utc::now())
    }

    /// Issues a refresh token for `subject`.
    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, AppError> {
        self.issue_at(subject, TokenKind::Refresh, Utc::now())
    }

    /// Issues an access and a refresh token sharing the same issue time.
    pub fn issue_token_pair(&self, subject: &str) -> Result<TokenPair, AppError> {
        self.issue_token_pair_at(subject, Utc::now())
    }

    /// Issues a token pair as if the clock read `now`.
    pub fn issue_token_pair_at(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_at(subject, TokenKind::Access, now)?,
            refresh_token: self.issue_at(subject, TokenKind::Refresh, now)?,
            access_expires_at: now + self.access_ttl,
            refresh_expires_at: now + self.refresh_ttl,
        })
    }

    /// Issues a token of `kind` as if the clock read `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            token_kind: kind,
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign {kind} token: {e}")))
    }

    /// Verifies signature and expiry of a token of either kind.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verify_token_at(token, Utc::now())
    }

    /// Verifies a token and requires it to be an access token.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verify_kind_at(token, TokenKind::Access, Utc::now())
    }

    /// Verifies a token and requires it to be a refresh token.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verify_kind_at(token, TokenKind::Refresh, Utc::now())
    }

    /// Verifies a token and its kind as if the clock read `now`.
    pub fn verify_kind_at(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims, AppError> {
        let claims = self.verify_token_at(token, now)?;
        if claims.token_kind != expected {
            debug!(expected = %expected, actual = %claims.token_kind, "Rejected token of wrong kind");
            return Err(AppError::invalid_token(format!(
                "Invalid token type: expected {expected} token"
            )));
        }
        Ok(claims)
    }

    /// Verifies signature and expiry as if the clock read `now`.
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Token failed validation");
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::invalid_token("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::invalid_token("Invalid token format")
                }
                _ => AppError::invalid_token(format!("Token validation failed: {e}")),
            }
        })?;

        if data.claims.is_expired_at(now) {
            return Err(AppError::invalid_token("Token has expired"));
        }

        Ok(data.claims)
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, AppError> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|_| AppError::configuration(format!("Unknown JWT algorithm '{name}'")))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(AppError::configuration(format!(
            "JWT algorithm {other:?} is not supported for shared-secret signing"
        ))),
    }
}

fn minutes(value: u64) -> Result<Duration, AppError> {
    i64::try_from(value)
        .ok()
        .and_then(Duration::try_minutes)
        .ok_or_else(|| AppError::configuration(format!("Token lifetime {value} minutes is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notehub_core::config::DeploymentMode;
    use notehub_core::error::ErrorKind;

    fn config() -> AuthConfig {
        AuthConfig {
            mode: DeploymentMode::Test,
            jwt_secret: Some("unit-test-secret".to_string()),
            ..AuthConfig::default()
        }
    }

    fn service() -> TokenService {
        TokenService::new(&config()).unwrap()
    }

    #[test]
    fn test_access_token_valid_until_lifetime_elapses() {
        let svc = service();
        let issued = Utc::now();
        let token = svc.issue_at("user-1", TokenKind::Access, issued).unwrap();

        let claims = svc
            .verify_token_at(&token, issued + Duration::minutes(119))
            .unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.exp - claims.iat, 120 * 60);

        let err = svc
            .verify_token_at(&token, issued + Duration::minutes(120))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_refresh_token_lasts_thirty_days() {
        let svc = service();
        let issued = Utc::now();
        let token = svc.issue_at("user-1", TokenKind::Refresh, issued).unwrap();

        assert!(
            svc.verify_token_at(&token, issued + Duration::days(29))
                .is_ok()
        );
        assert!(
            svc.verify_token_at(&token, issued + Duration::days(30))
                .is_err()
        );
    }

    #[test]
    fn test_kind_is_enforced() {
        let svc = service();
        let pair = svc.issue_token_pair("user-1").unwrap();

        assert!(svc.verify_access_token(&pair.access_token).is_ok());
        assert!(svc.verify_refresh_token(&pair.refresh_token).is_ok());

        let err = svc.verify_access_token(&pair.refresh_token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        assert!(svc.verify_refresh_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_issuing_is_deterministic_for_fixed_clock() {
        let svc = service();
        let now = Utc::now();
        let a = svc.issue_at("user-1", TokenKind::Access, now).unwrap();
        let b = svc.issue_at("user-1", TokenKind::Access, now).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tampered_and_malformed_tokens_rejected() {
        let svc = service();
        let token = svc.issue_access_token("user-1").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        assert_eq!(
            svc.verify_token(&tampered).unwrap_err().kind,
            ErrorKind::InvalidToken
        );
        assert_eq!(
            svc.verify_token("not.a.jwt").unwrap_err().kind,
            ErrorKind::InvalidToken
        );
        assert!(svc.verify_token("").is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = TokenService::new(&AuthConfig {
            jwt_secret: Some("different-secret".to_string()),
            ..config()
        })
        .unwrap();
        let token = other.issue_access_token("user-1").unwrap();
        assert!(service().verify_token(&token).is_err());
    }

    #[test]
    fn test_verification_does_not_check_subject_existence() {
        let svc = service();
        let token = svc.issue_access_token("no-such-user").unwrap();
        assert_eq!(svc.verify_token(&token).unwrap().sub, "no-such-user");
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let err = TokenService::new(&AuthConfig {
            jwt_algorithm: "RS256".to_string(),
            ..config()
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_hs512_round_trip() {
        let svc = TokenService::new(&AuthConfig {
            jwt_algorithm: "HS512".to_string(),
            ..config()
        })
        .unwrap();
        let token = svc.issue_access_token("user-1").unwrap();
        assert!(svc.verify_access_token(&token).is_ok());
    }

    #[test]
    fn test_production_without_secret_fails() {
        let result = TokenService::new(&AuthConfig {
            mode: DeploymentMode::Production,
            jwt_secret: None,
            ..AuthConfig::default()
        });
        assert!(result.is_err());
    }
}
