//! Session token creation and validation.

pub mod claims;
pub mod service;

pub use claims::{Claims, TokenKind};
pub use service::{TokenPair, TokenService};
