//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use notehub_core::error::AppError;

/// Query string of the OAuth redirect back to the application.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CallbackQuery {
    /// Authorization code issued by the provider.
    #[validate(length(min = 1, message = "Authorization code is required"))]
    pub code: String,
    /// Opaque state echoed back by the provider.
    #[serde(default)]
    pub state: Option<String>,
}

/// Query string of `PUT /users/me/name`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameQuery {
    #[validate(length(min = 5, max = 100, message = "Name must be between 5 and 100 characters"))]
    pub new_name: String,
}

/// Body of `POST /users/me/notes`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(length(
        min = 10,
        max = 500,
        message = "Note content must be between 10 and 500 characters"
    ))]
    pub content: String,
}

/// Body of `POST /users/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Runs `validator` checks, mapping failures to a validation error.
pub fn validated<T: Validate>(value: T) -> Result<T, AppError> {
    value
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(value)
}
