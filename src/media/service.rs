//! Media file service.
//!
//! High-level operations over uploads: payload decoding, type
//! classification, quota enforcement, disk persistence, thumbnail
//! generation and metadata bookkeeping.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::warn;

use crate::db::{Database, User, UserRepository};
use crate::{MediadeckError, Result};

use super::category::{self, FileCategory};
use super::metadata::{MediaFile, MediaFileUpdate, MediaRepository, NewMediaFile};
use super::storage::MediaStorage;
use super::thumbnail;
use super::{DOWNLOAD_ROUTE_PREFIX, THUMBNAIL_ROUTE_PREFIX};

/// Request data for a file upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Base64 payload, possibly prefixed with a data-URL header.
    pub file_data: String,
    /// Original filename.
    pub filename: String,
    /// MIME type as reported by the client.
    pub mime_type: String,
    /// File size in bytes as reported by the client.
    pub file_size: i64,
    /// Display title (defaults to the filename).
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Owning user; the placeholder user is provisioned when unset.
    pub user_id: Option<i64>,
}

impl UploadRequest {
    /// Create a new upload request.
    pub fn new(
        file_data: impl Into<String>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        file_size: i64,
    ) -> Self {
        Self {
            file_data: file_data.into(),
            filename: filename.into(),
            mime_type: mime_type.into(),
            file_size,
            title: None,
            description: None,
            user_id: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the owning user.
    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Strip any data-URL header and decode the base64 payload.
pub fn decode_payload(file_data: &str) -> Result<Vec<u8>> {
    let encoded = match file_data.split_once(',') {
        Some((header, rest)) if header.starts_with("data:") => rest,
        _ => file_data,
    };

    BASE64
        .decode(encoded.trim())
        .map_err(|e| MediadeckError::InvalidPayload(format!("base64 decode failed: {e}")))
}

/// Media file service for managing uploads, downloads and deletion.
pub struct MediaService {
    db: Arc<Database>,
    storage: MediaStorage,
    default_storage_limit: i64,
}

impl MediaService {
    /// Create a new MediaService.
    pub fn new(db: Arc<Database>, storage: MediaStorage, default_storage_limit: i64) -> Self {
        Self {
            db,
            storage,
            default_storage_limit,
        }
    }

    /// Get the storage used by this service.
    pub fn storage(&self) -> &MediaStorage {
        &self.storage
    }

    /// Upload a file.
    ///
    /// Decodes the payload, classifies the type, enforces the owner's
    /// storage quota, persists the bytes (plus a thumbnail for images)
    /// and records the metadata. Record insert and usage increment run
    /// in one transaction; the quota guard re-checks inside it so two
    /// concurrent uploads cannot jointly exceed the ceiling.
    pub async fn upload(&self, request: &UploadRequest) -> Result<MediaFile> {
        let bytes = decode_payload(&request.file_data)?;
        let file_type = category::classify(&request.filename, &request.mime_type)?;

        let users = UserRepository::new(self.db.pool());
        let user = users
            .resolve_or_default(request.user_id, self.default_storage_limit)
            .await?;

        // Fail fast before touching the disk; the transactional guard
        // below still closes the concurrent window.
        if !user.can_store(request.file_size) {
            return Err(MediadeckError::QuotaExceeded {
                used: user.storage_used,
                limit: user.storage_limit,
                requested: request.file_size,
            });
        }

        let stored_name = MediaStorage::generate_stored_name(&request.filename);
        self.storage.save(&bytes, &stored_name)?;

        let mut thumbnail_path = None;
        let mut width = None;
        let mut height = None;

        if file_type == FileCategory::Image {
            // Thumbnail failures are non-fatal: log and proceed without one
            match thumbnail::generate(&bytes) {
                Ok(thumb) => {
                    width = Some(thumb.source_width as i64);
                    height = Some(thumb.source_height as i64);

                    let thumb_name = MediaStorage::thumbnail_name(&stored_name);
                    match self.storage.save(&thumb.jpeg, &thumb_name) {
                        Ok(()) => {
                            thumbnail_path = Some(format!("{THUMBNAIL_ROUTE_PREFIX}/{thumb_name}"))
                        }
                        Err(e) => warn!(file = %stored_name, error = %e, "failed to save thumbnail"),
                    }
                }
                Err(e) => warn!(file = %stored_name, error = %e, "thumbnail generation failed"),
            }
        }

        let title = match request.title.as_deref() {
            Some(t) if !t.is_empty() => Some(t.to_string()),
            _ => Some(request.filename.clone()),
        };
        let description = request.description.clone().filter(|d| !d.is_empty());

        let new_file = NewMediaFile {
            user_id: user.id,
            filename: stored_name.clone(),
            original_name: request.filename.clone(),
            mime_type: request.mime_type.clone(),
            file_size: request.file_size,
            file_type,
            storage_path: format!("{DOWNLOAD_ROUTE_PREFIX}/{stored_name}"),
            thumbnail_path,
            title,
            description,
            width,
            height,
        };

        match self.insert_with_quota(&user, &new_file).await {
            Ok(file) => Ok(file),
            Err(e) => {
                // Don't leave orphaned bytes behind a failed commit
                let _ = self.storage.delete(&stored_name);
                let _ = self
                    .storage
                    .delete(&MediaStorage::thumbnail_name(&stored_name));
                Err(e)
            }
        }
    }

    /// Insert the metadata record and increment the owner's usage in one
    /// transaction, guarded against concurrent quota overruns.
    async fn insert_with_quota(&self, user: &User, new_file: &NewMediaFile) -> Result<MediaFile> {
        let mut tx = self.db.pool().begin().await?;

        let guard = sqlx::query(
            "UPDATE users SET storage_used = storage_used + ?
             WHERE id = ? AND storage_used + ? <= storage_limit",
        )
        .bind(new_file.file_size)
        .bind(user.id)
        .bind(new_file.file_size)
        .execute(&mut *tx)
        .await?;

        if guard.rows_affected() == 0 {
            return Err(MediadeckError::QuotaExceeded {
                used: user.storage_used,
                limit: user.storage_limit,
                requested: new_file.file_size,
            });
        }

        let now = chrono::Utc::now();
        let result = sqlx::query(
            "INSERT INTO media_files (user_id, filename, original_name, mime_type, file_size,
                                      file_type, storage_path, thumbnail_path, title, description,
                                      width, height, uploaded_at, last_accessed)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new_file.user_id)
        .bind(&new_file.filename)
        .bind(&new_file.original_name)
        .bind(&new_file.mime_type)
        .bind(new_file.file_size)
        .bind(new_file.file_type)
        .bind(&new_file.storage_path)
        .bind(&new_file.thumbnail_path)
        .bind(&new_file.title)
        .bind(&new_file.description)
        .bind(new_file.width)
        .bind(new_file.height)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        MediaRepository::new(self.db.pool())
            .get_by_id(id)
            .await?
            .ok_or_else(|| MediadeckError::NotFound("file".to_string()))
    }

    /// Download a file's raw bytes along with a sniffed MIME type.
    ///
    /// Touches the last-accessed timestamp as a best-effort side effect.
    pub async fn download(&self, stored_name: &str) -> Result<(Vec<u8>, String)> {
        let bytes = self.storage.load(stored_name)?;

        let mime_type = mime_guess::from_path(stored_name)
            .first_or_octet_stream()
            .to_string();

        if let Err(e) = MediaRepository::new(self.db.pool())
            .touch_last_accessed(stored_name)
            .await
        {
            warn!(file = %stored_name, error = %e, "failed to touch last_accessed");
        }

        Ok((bytes, mime_type))
    }

    /// Load raw thumbnail bytes by stored thumbnail filename.
    pub fn thumbnail(&self, stored_name: &str) -> Result<Vec<u8>> {
        self.storage.load(stored_name)
    }

    /// Get file metadata by ID.
    pub async fn get(&self, file_id: i64) -> Result<MediaFile> {
        MediaRepository::new(self.db.pool())
            .get_by_id(file_id)
            .await?
            .ok_or_else(|| MediadeckError::NotFound("file".to_string()))
    }

    /// Update file metadata.
    pub async fn update(&self, file_id: i64, update: &MediaFileUpdate) -> Result<MediaFile> {
        MediaRepository::new(self.db.pool())
            .update(file_id, update)
            .await?
            .ok_or_else(|| MediadeckError::NotFound("file".to_string()))
    }

    /// Delete a file.
    ///
    /// Removes the stored bytes and thumbnail (absence of either is not
    /// an error), releases the owner's usage, and deletes the record.
    /// Dependent key assignments are cascade-deleted by the database.
    pub async fn delete(&self, file_id: i64) -> Result<()> {
        let file = self.get(file_id).await?;

        let _ = self.storage.delete(&file.filename);
        if let Some(ref thumbnail_path) = file.thumbnail_path {
            if let Some(thumb_name) = thumbnail_path.rsplit('/').next() {
                let _ = self.storage.delete(thumb_name);
            }
        }

        let mut tx = self.db.pool().begin().await?;

        // Usage is clamped at zero rather than allowed to go negative
        sqlx::query("UPDATE users SET storage_used = MAX(storage_used - ?, 0) WHERE id = ?")
            .bind(file.file_size)
            .bind(file.user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM media_files WHERE id = ?")
            .bind(file_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// List a user's files, newest upload first.
    pub async fn list(&self, user_id: i64) -> Result<Vec<MediaFile>> {
        MediaRepository::new(self.db.pool())
            .list_by_user(user_id)
            .await
    }
}
