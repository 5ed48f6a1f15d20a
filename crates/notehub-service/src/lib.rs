//! # notehub-service
//!
//! Business logic service layer for NoteHub. Services orchestrate the user
//! store, the token service, and the OAuth provider registry.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod note;
pub mod user;

pub use auth::{AuthFlowService, Authenticator, LoginOutcome};
pub use context::RequestContext;
pub use note::NoteService;
pub use user::UserService;
