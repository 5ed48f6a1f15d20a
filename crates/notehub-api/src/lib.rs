//! # notehub-api
//!
//! HTTP API layer for NoteHub built on Axum.
//!
//! Provides the login, profile, and note endpoints, the bearer-token
//! extractor, middleware (CORS, logging), DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, init_store, run_server};
pub use state::AppState;
