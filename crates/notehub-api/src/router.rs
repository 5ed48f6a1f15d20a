//! Route definitions for the NoteHub HTTP API.
//!
//! The welcome route sits at `/`; everything else is mounted under `/users`.

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with every route, threading `AppState` through.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .nest(
            "/users",
            Router::new()
                .merge(health_routes())
                .merge(auth_routes())
                .merge(user_routes())
                .merge(note_routes()),
        )
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Login redirect, provider callback, refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login/{provider}", get(handlers::auth::login))
        .route("/auth/{provider}/callback", get(handlers::auth::callback))
        .route("/auth/refresh", post(handlers::auth::refresh))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::user::me).delete(handlers::user::delete_me),
        )
        .route("/me/name", put(handlers::user::rename))
}

fn note_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me/notes",
            get(handlers::note::list_notes).post(handlers::note::create_note),
        )
        .route("/me/notes/{note_id}", delete(handlers::note::delete_note))
}
