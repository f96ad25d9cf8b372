//! Media file metadata types and repository.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, SqlitePool};

use crate::{MediadeckError, Result};

use super::category::FileCategory;

/// Metadata record for an uploaded media file.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MediaFile {
    /// Unique file ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Generated stored filename (uuid.ext).
    pub filename: String,
    /// Original filename as uploaded.
    pub original_name: String,
    /// MIME type as reported by the client.
    pub mime_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Coarse type category.
    pub file_type: FileCategory,
    /// Download route for the stored bytes.
    pub storage_path: String,
    /// Thumbnail route, when one was generated.
    pub thumbnail_path: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Tags serialized as a JSON array.
    pub tags: Option<String>,
    /// Duration in seconds for audio/video.
    pub duration: Option<i64>,
    /// Pixel width for images/video.
    pub width: Option<i64>,
    /// Pixel height for images/video.
    pub height: Option<i64>,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
    /// Last download timestamp.
    pub last_accessed: DateTime<Utc>,
}

impl MediaFile {
    /// Tags decoded from their JSON representation, empty when unset.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

/// Data for creating a new media file record.
#[derive(Debug, Clone)]
pub struct NewMediaFile {
    pub user_id: i64,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_type: FileCategory,
    pub storage_path: String,
    pub thumbnail_path: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Partial update for media file metadata.
///
/// Only set fields are written.
#[derive(Debug, Clone, Default)]
pub struct MediaFileUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New tag list, serialized to JSON on write.
    pub tags: Option<Vec<String>>,
}

impl MediaFileUpdate {
    /// Whether the update carries no changes.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.tags.is_none()
    }
}

const SELECT_COLUMNS: &str = "id, user_id, filename, original_name, mime_type, file_size, \
     file_type, storage_path, thumbnail_path, title, description, tags, duration, width, \
     height, uploaded_at, last_accessed";

/// Repository for media file metadata operations.
pub struct MediaRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MediaRepository<'a> {
    /// Create a new MediaRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a file by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<MediaFile>> {
        let result = sqlx::query_as::<_, MediaFile>(&format!(
            "SELECT {SELECT_COLUMNS} FROM media_files WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MediadeckError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a file by its stored filename.
    pub async fn get_by_filename(&self, filename: &str) -> Result<Option<MediaFile>> {
        let result = sqlx::query_as::<_, MediaFile>(&format!(
            "SELECT {SELECT_COLUMNS} FROM media_files WHERE filename = ?"
        ))
        .bind(filename)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MediadeckError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List a user's files, newest upload first.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<MediaFile>> {
        let files = sqlx::query_as::<_, MediaFile>(&format!(
            "SELECT {SELECT_COLUMNS} FROM media_files
             WHERE user_id = ? ORDER BY uploaded_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| MediadeckError::Database(e.to_string()))?;

        Ok(files)
    }

    /// Update file metadata.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated file, or None if not found.
    pub async fn update(&self, id: i64, update: &MediaFileUpdate) -> Result<Option<MediaFile>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE media_files SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title.clone());
        }
        if let Some(ref description) = update.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description.clone());
        }
        if let Some(ref tags) = update.tags {
            let serialized = serde_json::to_string(tags)
                .map_err(|e| MediadeckError::Validation(format!("invalid tags: {e}")))?;
            separated.push("tags = ");
            separated.push_bind_unseparated(serialized);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| MediadeckError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Touch the last-accessed timestamp for a stored filename.
    pub async fn touch_last_accessed(&self, filename: &str) -> Result<()> {
        sqlx::query("UPDATE media_files SET last_accessed = ? WHERE filename = ?")
            .bind(Utc::now())
            .bind(filename)
            .execute(self.pool)
            .await
            .map_err(|e| MediadeckError::Database(e.to_string()))?;
        Ok(())
    }
}
