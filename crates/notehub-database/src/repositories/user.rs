//! User repository implementation.

use chrono::Utc;
use sqlx::PgPool;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::UserId;
use notehub_entity::{CreateUser, UpdateUser, User};

/// Unique constraint on `users.email`.
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Repository for user CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Insert a new user. `last_login_date` starts equal to `created_date`.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let user = User::from_create(data, Utc::now());

        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, name, created_date, last_login_date) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.created_date)
        .bind(user.last_login_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(EMAIL_CONSTRAINT) => {
                AppError::conflict(format!("Email '{}' is already registered", data.email))
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to create user", other),
        })
    }

    /// Apply a partial update in a single statement.
    pub async fn update(&self, update: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                email = COALESCE($2, email), \
                name = COALESCE($3, name), \
                last_login_date = COALESCE($4, last_login_date) \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(update.id)
        .bind(update.email.as_deref())
        .bind(update.name.as_deref())
        .bind(update.last_login_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(EMAIL_CONSTRAINT) => {
                AppError::conflict("Email is already in use")
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to update user", other),
        })
    }

    /// Delete a user. Owned notes go with it through `ON DELETE CASCADE`.
    pub async fn delete(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
