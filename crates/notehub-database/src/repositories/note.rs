//! Note repository implementation.

use chrono::Utc;
use sqlx::PgPool;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::{NoteId, UserId};
use notehub_entity::{CreateNote, Note};

/// Foreign key from `notes.user_id` to `users.id`.
const OWNER_FK_CONSTRAINT: &str = "notes_user_id_fkey";

/// Repository for note CRUD operations.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    /// Create a new note repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a user's notes, oldest first.
    pub async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE user_id = $1 ORDER BY created_date ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notes", e))
    }

    /// Insert a note.
    pub async fn create(&self, data: &CreateNote) -> AppResult<Note> {
        sqlx::query_as::<_, Note>(
            "INSERT INTO notes (id, user_id, content, created_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(NoteId::new())
        .bind(data.user_id)
        .bind(&data.content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(OWNER_FK_CONSTRAINT) =>
            {
                AppError::not_found("User not found")
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to create note", other),
        })
    }

    /// Delete a note only when it belongs to `user_id`.
    pub async fn delete_owned(&self, user_id: UserId, note_id: NoteId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(note_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete note", e))?;

        Ok(result.rows_affected() > 0)
    }
}
