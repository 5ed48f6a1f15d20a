//! Note creation, listing, and deletion scoped to the authenticated user.

use std::ops::RangeInclusive;
use std::sync::Arc;

use tracing::info;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::NoteId;
use notehub_database::UserStore;
use notehub_entity::{CreateNote, Note};

use crate::context::RequestContext;

/// Allowed length of note content, in characters.
pub const CONTENT_LENGTH: RangeInclusive<usize> = 10..=500;

/// Manages the current user's notes.
#[derive(Debug, Clone)]
pub struct NoteService {
    /// User persistence.
    store: Arc<dyn UserStore>,
}

impl NoteService {
    /// Creates a new note service.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Creates a note owned by the current user.
    pub async fn create(&self, ctx: &RequestContext, content: &str) -> AppResult<Note> {
        if !CONTENT_LENGTH.contains(&content.chars().count()) {
            return Err(AppError::validation(format!(
                "Note content must be between {} and {} characters",
                CONTENT_LENGTH.start(),
                CONTENT_LENGTH.end()
            )));
        }

        let note = self
            .store
            .create_note(&CreateNote {
                user_id: ctx.user_id,
                content: content.to_string(),
            })
            .await?;

        info!(user_id = %ctx.user_id, note_id = %note.id, "Note created");
        Ok(note)
    }

    /// Lists the current user's notes, oldest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Note>> {
        self.store.list_notes(ctx.user_id).await
    }

    /// Deletes one of the current user's notes.
    ///
    /// A note that does not exist and a note owned by someone else are
    /// indistinguishable: both are `NotFound`.
    pub async fn delete(&self, ctx: &RequestContext, note_id: NoteId) -> AppResult<()> {
        if !self.store.delete_note(ctx.user_id, note_id).await? {
            return Err(AppError::not_found("Note not found"));
        }

        info!(user_id = %ctx.user_id, note_id = %note_id, "Note deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notehub_core::error::ErrorKind;
    use notehub_database::MemoryUserStore;
    use notehub_entity::CreateUser;

    async fn context_for(store: &MemoryUserStore, email: &str) -> RequestContext {
        let user = store
            .create_user(&CreateUser {
                email: email.to_string(),
                name: "Note Taker".to_string(),
            })
            .await
            .unwrap();
        RequestContext::for_user(&user)
    }

    #[tokio::test]
    async fn test_note_lifecycle() {
        let store = Arc::new(MemoryUserStore::new());
        let ctx = context_for(&store, "ada@example.com").await;
        let service = NoteService::new(store.clone());

        let note = service.create(&ctx, "buy more punch cards").await.unwrap();
        let listed = service.list(&ctx).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, note.id);
        assert_eq!(listed[0].content, "buy more punch cards");

        service.delete(&ctx, note.id).await.unwrap();
        assert!(service.list(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_content_bounds() {
        let store = Arc::new(MemoryUserStore::new());
        let ctx = context_for(&store, "ada@example.com").await;
        let service = NoteService::new(store);

        assert_eq!(
            service.create(&ctx, "too short").await.unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(
            service.create(&ctx, &"x".repeat(501)).await.unwrap_err().kind,
            ErrorKind::Validation
        );
        assert!(service.create(&ctx, &"x".repeat(10)).await.is_ok());
        assert!(service.create(&ctx, &"x".repeat(500)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_or_foreign_note_is_not_found() {
        let store = Arc::new(MemoryUserStore::new());
        let owner = context_for(&store, "owner@example.com").await;
        let other = context_for(&store, "other@example.com").await;
        let service = NoteService::new(store.clone());

        let note = service.create(&owner, "owner's private thoughts").await.unwrap();

        assert_eq!(
            service.delete(&other, note.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            service.delete(&owner, NoteId::new()).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(service.list(&owner).await.unwrap().len(), 1);
    }
}
