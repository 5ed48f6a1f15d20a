//! Typed path parameter helpers.

use notehub_core::error::AppError;
use notehub_core::types::NoteId;

/// Parses a note ID from a path segment.
pub fn parse_note_id(s: &str) -> Result<NoteId, AppError> {
    s.parse::<NoteId>()
        .map_err(|_| AppError::validation(format!("Invalid note id: {s}")))
}
