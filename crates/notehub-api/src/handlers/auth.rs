//! Auth handlers: login redirect, provider callback, refresh.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::{CallbackQuery, RefreshRequest};
use crate::dto::response::{LoginUrlResponse, TokenResponse};
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// GET /users/login/{provider}
pub async fn login(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> ApiResult<Json<LoginUrlResponse>> {
    let request = state.auth_flow.begin_login(&provider)?;
    Ok(Json(request.into()))
}

/// GET /users/auth/{provider}/callback
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    ValidatedQuery(query): ValidatedQuery<CallbackQuery>,
) -> ApiResult<Json<TokenResponse>> {
    let outcome = state
        .auth_flow
        .complete_login(&provider, &query.code)
        .await?;
    Ok(Json(outcome.tokens.into()))
}

/// POST /users/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let tokens = state.auth_flow.refresh(&req.refresh_token).await?;
    Ok(Json(tokens.into()))
}
