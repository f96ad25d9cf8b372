//! User repository for mediadeck.

use sqlx::SqlitePool;

use super::user::{NewUser, User, DEFAULT_USER_EMAIL, DEFAULT_USER_NAME};
use crate::{MediadeckError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (email, name, created_at, storage_limit) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(chrono::Utc::now())
        .bind(new_user.storage_limit)
        .execute(self.pool)
        .await
        .map_err(|e| MediadeckError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| MediadeckError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, email, name, created_at, storage_used, storage_limit
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MediadeckError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, email, name, created_at, storage_used, storage_limit
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MediadeckError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Resolve a user by ID, falling back to the lazily provisioned
    /// placeholder user when the ID is absent or unknown.
    pub async fn resolve_or_default(
        &self,
        user_id: Option<i64>,
        default_storage_limit: i64,
    ) -> Result<User> {
        if let Some(id) = user_id {
            if let Some(user) = self.get_by_id(id).await? {
                return Ok(user);
            }
        }

        if let Some(user) = self.get_by_email(DEFAULT_USER_EMAIL).await? {
            return Ok(user);
        }

        self.create(&NewUser::new(
            DEFAULT_USER_EMAIL,
            DEFAULT_USER_NAME,
            default_storage_limit,
        ))
        .await
    }
}
