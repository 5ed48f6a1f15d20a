//! Third-party login providers.

pub mod google;
pub mod mock;
pub mod provider;
pub mod registry;
pub mod state;

pub use google::GoogleProvider;
pub use mock::MockProvider;
pub use provider::{AuthorizationRequest, IdentityClaims, OAuthProvider};
pub use registry::ProviderRegistry;
pub use state::generate_state;
