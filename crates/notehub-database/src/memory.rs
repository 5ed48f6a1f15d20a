//! In-memory [`UserStore`] using a Tokio read-write lock.
//!
//! Suitable for tests and single-process local runs only; nothing survives
//! a restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::{NoteId, UserId};
use notehub_entity::{CreateNote, CreateUser, Note, UpdateUser, User};

use crate::store::UserStore;

#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<UserId, User>,
    /// email -> owner, kept in lockstep with `users`.
    emails: HashMap<String, UserId>,
    /// Notes per owner in insertion order.
    notes: HashMap<UserId, Vec<Note>>,
}

/// Process-local user store.
///
/// Every mutation happens under a single write lock, which makes user
/// creation, updates, and cascading deletes atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Number of stored notes across all users.
    pub async fn note_count(&self) -> usize {
        self.state.read().await.notes.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .emails
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;

        if state.emails.contains_key(&data.email) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }

        let user = User::from_create(data, Utc::now());
        state.emails.insert(user.email.clone(), user.id);
        state.users.insert(user.id, user.clone());

        debug!(user_id = %user.id, "Stored new user");
        Ok(user)
    }

    async fn update_user(&self, update: &UpdateUser) -> AppResult<Option<User>> {
        let mut state = self.state.write().await;

        let Some(current) = state.users.get(&update.id) else {
            return Ok(None);
        };
        let previous_email = current.email.clone();

        if let Some(email) = &update.email {
            match state.emails.get(email) {
                Some(owner) if *owner != update.id => {
                    return Err(AppError::conflict("Email is already in use"));
                }
                _ => {}
            }
        }

        let mut updated = current.clone();
        updated.apply(update);

        if updated.email != previous_email {
            state.emails.remove(&previous_email);
            state.emails.insert(updated.email.clone(), updated.id);
        }
        state.users.insert(updated.id, updated.clone());

        Ok(Some(updated))
    }

    async fn delete_user(&self, id: UserId) -> AppResult<bool> {
        let mut state = self.state.write().await;

        let Some(user) = state.users.remove(&id) else {
            return Ok(false);
        };
        state.emails.remove(&user.email);
        let removed_notes = state.notes.remove(&id).map_or(0, |notes| notes.len());

        debug!(user_id = %id, removed_notes, "Deleted user and owned notes");
        Ok(true)
    }

    async fn list_notes(&self, user_id: UserId) -> AppResult<Vec<Note>> {
        Ok(self
            .state
            .read()
            .await
            .notes
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_note(&self, data: &CreateNote) -> AppResult<Note> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&data.user_id) {
            return Err(AppError::not_found("User not found"));
        }

        let note = Note {
            id: NoteId::new(),
            user_id: data.user_id,
            content: data.content.clone(),
            created_date: Utc::now(),
        };
        state
            .notes
            .entry(data.user_id)
            .or_default()
            .push(note.clone());

        Ok(note)
    }

    async fn delete_note(&self, user_id: UserId, note_id: NoteId) -> AppResult<bool> {
        let mut state = self.state.write().await;

        let Some(notes) = state.notes.get_mut(&user_id) else {
            return Ok(false);
        };
        let before = notes.len();
        notes.retain(|note| note.id != note_id);

        Ok(notes.len() < before)
    }
}
