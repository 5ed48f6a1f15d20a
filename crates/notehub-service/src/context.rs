//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notehub_core::types::UserId;
use notehub_entity::User;

/// Context for the current authenticated request.
///
/// Built from the user resolved by the authenticator, never from a
/// client-supplied identifier, and passed into service methods so every
/// operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The authenticated user's email.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `user`.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            request_time: Utc::now(),
        }
    }
}
