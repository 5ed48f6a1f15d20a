//! Handlers for the authenticated user's own account.

use axum::Json;
use axum::extract::State;

use notehub_entity::{User, UserWithNotes};

use crate::dto::request::RenameQuery;
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedQuery};
use crate::state::AppState;

/// GET /users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserWithNotes>> {
    let user = state.user_service.get_with_notes(&auth).await?;
    Ok(Json(user))
}

/// PUT /users/me/name
pub async fn rename(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<RenameQuery>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.rename(&auth, &query.new_name).await?;
    Ok(Json(user))
}

/// DELETE /users/me
pub async fn delete_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    state.user_service.delete_account(&auth).await?;
    Ok(Json(MessageResponse::new("User account deleted successfully")))
}
