//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notehub_core::types::UserId;

use crate::note::Note;

/// A user created on first OAuth login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique, immutable user identifier.
    pub id: UserId,
    /// Email address, unique across all users.
    pub email: String,
    /// Display name.
    pub name: String,
    /// When the user was created.
    pub created_date: DateTime<Utc>,
    /// Last successful login. Equal to `created_date` until the second login.
    pub last_login_date: DateTime<Utc>,
}

impl User {
    /// Builds a brand-new user from first-login data.
    pub fn from_create(data: &CreateUser, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            email: data.email.clone(),
            name: data.name.clone(),
            created_date: now,
            last_login_date: now,
        }
    }

    /// Applies the set fields of `update` in place.
    ///
    /// `update.id` is only used to find the row; the identifier itself never changes.
    pub fn apply(&mut self, update: &UpdateUser) {
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(last_login_date) = update.last_login_date {
            self.last_login_date = last_login_date;
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address from the identity provider.
    pub email: String,
    /// Display name from the identity provider.
    pub name: String,
}

/// Partial update of an existing user. Unset fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// The user to update.
    pub id: UserId,
    /// New email address.
    pub email: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// New last-login timestamp.
    pub last_login_date: Option<DateTime<Utc>>,
}

impl UpdateUser {
    /// Empty update for `id`; set the fields to change on the result.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            name: None,
            last_login_date: None,
        }
    }

    /// Update that only touches the last-login timestamp.
    pub fn last_login(id: UserId, at: DateTime<Utc>) -> Self {
        Self {
            last_login_date: Some(at),
            ..Self::new(id)
        }
    }

    /// Update that only renames the user.
    pub fn rename(id: UserId, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(id)
        }
    }
}

/// A user together with every note they own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithNotes {
    /// The user row.
    #[serde(flatten)]
    pub user: User,
    /// Notes owned by the user, oldest first.
    pub notes: Vec<Note>,
}
