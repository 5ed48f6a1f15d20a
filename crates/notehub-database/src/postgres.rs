//! [`UserStore`] backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use notehub_core::result::AppResult;
use notehub_core::types::{NoteId, UserId};
use notehub_entity::{CreateNote, CreateUser, Note, UpdateUser, User};

use crate::connection::DatabasePool;
use crate::repositories::{NoteRepository, UserRepository};
use crate::store::UserStore;

/// PostgreSQL user store composed of the user and note repositories.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: DatabasePool,
    users: UserRepository,
    notes: NoteRepository,
}

impl PgUserStore {
    /// Create a store sharing one connection pool between both repositories.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.pool().clone()),
            notes: NoteRepository::new(pool.pool().clone()),
            pool,
        }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        self.pool.pool()
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email).await
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        self.users.create(data).await
    }

    async fn update_user(&self, update: &UpdateUser) -> AppResult<Option<User>> {
        self.users.update(update).await
    }

    async fn delete_user(&self, id: UserId) -> AppResult<bool> {
        self.users.delete(id).await
    }

    async fn list_notes(&self, user_id: UserId) -> AppResult<Vec<Note>> {
        self.notes.find_by_user(user_id).await
    }

    async fn create_note(&self, data: &CreateNote) -> AppResult<Note> {
        self.notes.create(data).await
    }

    async fn delete_note(&self, user_id: UserId, note_id: NoteId) -> AppResult<bool> {
        self.notes.delete_owned(user_id, note_id).await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.pool.health_check().await
    }
}
