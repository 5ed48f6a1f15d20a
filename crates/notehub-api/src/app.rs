//! Application builder: wires router, middleware and state into an Axum app
//! and runs it.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use notehub_core::config::{AppConfig, StorageBackend};
use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_database::{DatabasePool, MemoryUserStore, PgUserStore, UserStore};

use crate::middleware::{build_cors_layer, request_logging};
use crate::router::build_router;
use crate::state::AppState;

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    build_router(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
}

/// Per-request trace span. Records the path only; OAuth callbacks carry
/// the authorization code in the query string.
fn make_request_span(request: &Request) -> tracing::Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}

/// Opens the configured persistence backend.
///
/// Postgres connects and applies pending migrations before returning.
pub async fn init_store(config: &AppConfig) -> AppResult<Arc<dyn UserStore>> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            notehub_database::migration::run_migrations(pool.pool()).await?;
            Ok(Arc::new(PgUserStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}

/// Binds the configured address and serves until a shutdown signal arrives.
pub async fn run_server(state: AppState) -> AppResult<()> {
    let addr = state.config.server.bind_address();
    let providers: Vec<String> = state
        .providers
        .names()
        .into_iter()
        .map(str::to_owned)
        .collect();
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, providers = ?providers, "NoteHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
