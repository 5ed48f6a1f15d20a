//! Note entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notehub_core::types::{NoteId, UserId};

/// A short text note owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Note {
    /// Unique note identifier.
    pub id: NoteId,
    /// Owning user. Notes are deleted together with their owner.
    #[serde(skip_serializing, default)]
    pub user_id: UserId,
    /// Note text.
    pub content: String,
    /// When the note was created.
    pub created_date: DateTime<Utc>,
}

/// Data required to create a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    /// Owning user.
    pub user_id: UserId,
    /// Note text.
    pub content: String,
}
