//! Note handlers.

use axum::Json;
use axum::extract::{Path, State};

use notehub_entity::Note;

use crate::dto::request::CreateNoteRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, parse_note_id};
use crate::state::AppState;

/// POST /users/me/notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateNoteRequest>,
) -> ApiResult<Json<Note>> {
    let note = state.note_service.create(&auth, &req.content).await?;
    Ok(Json(note))
}

/// GET /users/me/notes
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Note>>> {
    let notes = state.note_service.list(&auth).await?;
    Ok(Json(notes))
}

/// DELETE /users/me/notes/{note_id}
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(note_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let note_id = parse_note_id(&note_id)?;
    state.note_service.delete(&auth, note_id).await?;
    Ok(Json(MessageResponse::new("Note deleted successfully")))
}
