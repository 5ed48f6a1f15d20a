//! The persistence seam used by the auth flow, the auth extractor, and
//! the user/note services.

use async_trait::async_trait;

use notehub_core::result::AppResult;
use notehub_core::types::{NoteId, UserId};
use notehub_entity::{CreateNote, CreateUser, Note, UpdateUser, User, UserWithNotes};

/// Storage for users and the notes they own.
///
/// Implementations must guarantee:
/// - `email` is unique across users; a duplicate `create_user` fails with
///   a `Conflict` error and stores nothing.
/// - `create_user`, `update_user`, and `delete_user` are each atomic.
/// - `delete_user` removes every note owned by the user in the same step.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email address.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user.
    async fn create_user(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply a partial update. Returns `None` if the user does not exist.
    async fn update_user(&self, update: &UpdateUser) -> AppResult<Option<User>>;

    /// Delete a user and all of their notes. Returns `true` if a user was removed.
    async fn delete_user(&self, id: UserId) -> AppResult<bool>;

    /// List a user's notes, oldest first.
    async fn list_notes(&self, user_id: UserId) -> AppResult<Vec<Note>>;

    /// Create a note for an existing user.
    async fn create_note(&self, data: &CreateNote) -> AppResult<Note>;

    /// Delete a note if it exists and belongs to `user_id`.
    async fn delete_note(&self, user_id: UserId, note_id: NoteId) -> AppResult<bool>;

    /// Check that the backing storage is reachable.
    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    /// Load a user together with their notes.
    async fn find_user_with_notes(&self, id: UserId) -> AppResult<Option<UserWithNotes>> {
        let Some(user) = self.find_user_by_id(id).await? else {
            return Ok(None);
        };
        let notes = self.list_notes(id).await?;
        Ok(Some(UserWithNotes { user, notes }))
    }
}
