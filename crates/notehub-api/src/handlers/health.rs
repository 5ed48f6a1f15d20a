//! Welcome and liveness handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{HealthResponse, MessageResponse};
use crate::state::AppState;

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the NoteHub OAuth2 app!"))
}

/// GET /users/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = match state.store.health_check().await {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            "unavailable".to_string()
        }
    };

    let status = if storage == "ok" { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
    })
}
