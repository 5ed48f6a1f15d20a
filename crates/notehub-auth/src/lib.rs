//! # notehub-auth
//!
//! Session tokens and third-party login for NoteHub.
//!
//! ## Modules
//!
//! - `token`: signed access/refresh token issuance and verification
//! - `oauth`: the [`OAuthProvider`] capability, the Google and mock
//!   providers, and the immutable [`ProviderRegistry`]

pub mod oauth;
pub mod token;

pub use oauth::{
    AuthorizationRequest, GoogleProvider, IdentityClaims, MockProvider, OAuthProvider,
    ProviderRegistry,
};
pub use token::{Claims, TokenKind, TokenPair, TokenService};
