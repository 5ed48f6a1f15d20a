//! Login orchestration and bearer-token authentication.

pub mod authenticator;
pub mod flow;

pub use authenticator::Authenticator;
pub use flow::{AuthFlowService, LoginOutcome};
