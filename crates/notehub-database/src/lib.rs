//! # notehub-database
//!
//! The [`UserStore`] persistence seam plus its two implementations:
//! PostgreSQL repositories (via sqlx) and a process-local in-memory store
//! used for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
pub use store::UserStore;
