//! User self-service operations.

use std::ops::RangeInclusive;
use std::sync::Arc;

use tracing::info;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_database::UserStore;
use notehub_entity::{UpdateUser, User, UserWithNotes};

use crate::context::RequestContext;

/// Allowed length of a display name, in characters.
pub const NAME_LENGTH: RangeInclusive<usize> = 5..=100;

/// Handles the authenticated user's own account.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User persistence.
    store: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Gets the current user together with their notes.
    pub async fn get_with_notes(&self, ctx: &RequestContext) -> AppResult<UserWithNotes> {
        self.store
            .find_user_with_notes(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Changes the current user's display name.
    pub async fn rename(&self, ctx: &RequestContext, new_name: &str) -> AppResult<User> {
        let new_name = new_name.trim();
        if !NAME_LENGTH.contains(&new_name.chars().count()) {
            return Err(AppError::validation(format!(
                "Name must be between {} and {} characters",
                NAME_LENGTH.start(),
                NAME_LENGTH.end()
            )));
        }

        let user = self
            .store
            .update_user(&UpdateUser::rename(ctx.user_id, new_name))
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %ctx.user_id, "User renamed");
        Ok(user)
    }

    /// Deletes the current user and every note they own.
    pub async fn delete_account(&self, ctx: &RequestContext) -> AppResult<()> {
        if !self.store.delete_user(ctx.user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %ctx.user_id, "User account deleted");
        Ok(())
    }
}
