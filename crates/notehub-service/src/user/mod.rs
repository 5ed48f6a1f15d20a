//! User self-service: profile, rename, and account deletion.

pub mod service;

pub use service::UserService;
