//! Key assignment types and repository.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, SqlitePool};

use crate::{MediadeckError, Result};

/// Lowest valid key number.
pub const KEY_MIN: i64 = 1;

/// Highest valid key number.
pub const KEY_MAX: i64 = 5;

/// Reject key numbers outside the fixed 1..=5 slot range.
pub fn validate_key_number(key_number: i64) -> Result<()> {
    if (KEY_MIN..=KEY_MAX).contains(&key_number) {
        Ok(())
    } else {
        Err(MediadeckError::InvalidKeyNumber(key_number))
    }
}

/// A per-user binding of one numbered key slot to an uploaded file.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KeyAssignment {
    /// Unique assignment ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Referenced media file ID.
    pub file_id: i64,
    /// Key slot number (1..=5).
    pub key_number: i64,
    /// Title override for display.
    pub custom_title: Option<String>,
    /// Description override for display.
    pub custom_description: Option<String>,
    /// When the slot was last assigned.
    pub assigned_at: DateTime<Utc>,
}

/// Partial update for an assignment's display overrides.
#[derive(Debug, Clone, Default)]
pub struct AssignmentChanges {
    /// New custom title.
    pub custom_title: Option<String>,
    /// New custom description.
    pub custom_description: Option<String>,
}

impl AssignmentChanges {
    /// Whether the update carries no changes.
    pub fn is_empty(&self) -> bool {
        self.custom_title.is_none() && self.custom_description.is_none()
    }
}

const SELECT_COLUMNS: &str =
    "id, user_id, file_id, key_number, custom_title, custom_description, assigned_at";

/// Repository for key assignment operations.
pub struct AssignmentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AssignmentRepository<'a> {
    /// Create a new AssignmentRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the assignment occupying a slot, if any.
    pub async fn get(&self, user_id: i64, key_number: i64) -> Result<Option<KeyAssignment>> {
        let result = sqlx::query_as::<_, KeyAssignment>(&format!(
            "SELECT {SELECT_COLUMNS} FROM key_assignments WHERE user_id = ? AND key_number = ?"
        ))
        .bind(user_id)
        .bind(key_number)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MediadeckError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List a user's assignments ordered by key number.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<KeyAssignment>> {
        let assignments = sqlx::query_as::<_, KeyAssignment>(&format!(
            "SELECT {SELECT_COLUMNS} FROM key_assignments
             WHERE user_id = ? ORDER BY key_number"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| MediadeckError::Database(e.to_string()))?;

        Ok(assignments)
    }

    /// Assign a file to a slot, overwriting any existing assignment in
    /// place (idempotent upsert).
    ///
    /// Returns the assignment and `true` when a new row was created.
    pub async fn assign(
        &self,
        user_id: i64,
        file_id: i64,
        key_number: i64,
        custom_title: Option<&str>,
        custom_description: Option<&str>,
    ) -> Result<(KeyAssignment, bool)> {
        let mut tx = self.pool.begin().await?;

        let existing_id: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM key_assignments WHERE user_id = ? AND key_number = ?",
        )
        .bind(user_id)
        .bind(key_number)
        .fetch_optional(&mut *tx)
        .await?;

        let (id, created) = match existing_id {
            Some(id) => {
                sqlx::query(
                    "UPDATE key_assignments
                     SET file_id = ?, custom_title = ?, custom_description = ?, assigned_at = ?
                     WHERE id = ?",
                )
                .bind(file_id)
                .bind(custom_title)
                .bind(custom_description)
                .bind(Utc::now())
                .bind(id)
                .execute(&mut *tx)
                .await?;
                (id, false)
            }
            None => {
                let result = sqlx::query(
                    "INSERT INTO key_assignments
                         (user_id, file_id, key_number, custom_title, custom_description, assigned_at)
                     VALUES (?, ?, ?, ?, ?, ?)",
                )
                .bind(user_id)
                .bind(file_id)
                .bind(key_number)
                .bind(custom_title)
                .bind(custom_description)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
                (result.last_insert_rowid(), true)
            }
        };

        tx.commit().await?;

        let assignment = self
            .get(user_id, key_number)
            .await?
            .filter(|a| a.id == id)
            .ok_or_else(|| MediadeckError::NotFound("assignment".to_string()))?;

        Ok((assignment, created))
    }

    /// Update an assignment's display overrides.
    ///
    /// Only fields that are set will be modified. Returns the updated
    /// assignment, or None if the slot is vacant.
    pub async fn update(
        &self,
        user_id: i64,
        key_number: i64,
        changes: &AssignmentChanges,
    ) -> Result<Option<KeyAssignment>> {
        if changes.is_empty() {
            return self.get(user_id, key_number).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE key_assignments SET ");
        let mut separated = query.separated(", ");

        if let Some(ref custom_title) = changes.custom_title {
            separated.push("custom_title = ");
            separated.push_bind_unseparated(custom_title.clone());
        }
        if let Some(ref custom_description) = changes.custom_description {
            separated.push("custom_description = ");
            separated.push_bind_unseparated(custom_description.clone());
        }

        query.push(" WHERE user_id = ");
        query.push_bind(user_id);
        query.push(" AND key_number = ");
        query.push_bind(key_number);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| MediadeckError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(user_id, key_number).await
    }

    /// Delete the assignment occupying a slot.
    ///
    /// Returns `true` if a row was deleted, `false` if the slot was vacant.
    pub async fn delete(&self, user_id: i64, key_number: i64) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM key_assignments WHERE user_id = ? AND key_number = ?")
                .bind(user_id)
                .bind(key_number)
                .execute(self.pool)
                .await
                .map_err(|e| MediadeckError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every assignment for a user, returning the count cleared.
    pub async fn delete_all(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM key_assignments WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| MediadeckError::Database(e.to_string()))?;
        Ok(result.rows_affected())
    }
}
