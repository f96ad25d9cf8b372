//! Response DTOs for the Web API.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::assignment::ResolvedAssignment;
use crate::media::{FileCategory, MediaFile};

/// Round a byte count to megabytes with two decimals.
fn to_mb(bytes: i64) -> f64 {
    (bytes as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0
}

/// Serialized media file record.
#[derive(Debug, Clone, Serialize)]
pub struct FilePayload {
    pub id: i64,
    pub user_id: i64,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_size_mb: f64,
    pub file_type: FileCategory,
    pub storage_path: String,
    pub thumbnail_path: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub duration: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub uploaded_at: String,
    pub last_accessed: String,
}

impl From<&MediaFile> for FilePayload {
    fn from(file: &MediaFile) -> Self {
        Self {
            id: file.id,
            user_id: file.user_id,
            filename: file.filename.clone(),
            original_name: file.original_name.clone(),
            mime_type: file.mime_type.clone(),
            file_size: file.file_size,
            file_size_mb: to_mb(file.file_size),
            file_type: file.file_type,
            storage_path: file.storage_path.clone(),
            thumbnail_path: file.thumbnail_path.clone(),
            title: file.title.clone(),
            description: file.description.clone(),
            tags: file.tag_list(),
            duration: file.duration,
            width: file.width,
            height: file.height,
            uploaded_at: file.uploaded_at.to_rfc3339(),
            last_accessed: file.last_accessed.to_rfc3339(),
        }
    }
}

/// Upload confirmation.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub file: FilePayload,
}

/// Download payload carrying the file as a data-URL.
#[derive(Debug, Serialize)]
pub struct DownloadPayload {
    pub filename: String,
    pub mime_type: String,
    pub data: String,
    pub size: usize,
}

/// Thumbnail payload carrying the JPEG as a data-URL.
#[derive(Debug, Serialize)]
pub struct ThumbnailPayload {
    pub thumbnail: String,
}

/// File listing for a user.
#[derive(Debug, Serialize)]
pub struct FileListPayload {
    pub files: Vec<FilePayload>,
    pub count: usize,
}

/// Updated-file confirmation.
#[derive(Debug, Serialize)]
pub struct FileUpdateResponse {
    pub message: String,
    pub file: FilePayload,
}

/// Generic message-only response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Serialized key assignment with its referenced file and read-time
/// display resolution.
#[derive(Debug, Serialize)]
pub struct AssignmentPayload {
    pub id: i64,
    pub user_id: i64,
    pub file_id: i64,
    pub key_number: i64,
    pub custom_title: Option<String>,
    pub custom_description: Option<String>,
    pub assigned_at: String,
    pub file: FilePayload,
    pub display_title: String,
    pub display_description: String,
}

impl From<&ResolvedAssignment> for AssignmentPayload {
    fn from(resolved: &ResolvedAssignment) -> Self {
        Self {
            id: resolved.assignment.id,
            user_id: resolved.assignment.user_id,
            file_id: resolved.assignment.file_id,
            key_number: resolved.assignment.key_number,
            custom_title: resolved.assignment.custom_title.clone(),
            custom_description: resolved.assignment.custom_description.clone(),
            assigned_at: resolved.assignment.assigned_at.to_rfc3339(),
            file: FilePayload::from(&resolved.file),
            display_title: resolved.display_title(),
            display_description: resolved.display_description(),
        }
    }
}

/// Assignment confirmation.
#[derive(Debug, Serialize)]
pub struct AssignResponse {
    pub message: String,
    pub assignment: AssignmentPayload,
}

/// Dense slot map: every key 1..=5 is present, vacant slots are null.
#[derive(Debug, Serialize)]
pub struct AssignmentMapPayload {
    pub assignments: BTreeMap<String, Option<AssignmentPayload>>,
    pub count: usize,
}

/// Explicit not-assigned response for a vacant slot.
#[derive(Debug, Serialize)]
pub struct VacantSlotPayload {
    pub key_number: i64,
    pub assigned: bool,
    pub message: String,
}

impl VacantSlotPayload {
    pub fn new(key_number: i64) -> Self {
        Self {
            key_number,
            assigned: false,
            message: format!("No file assigned to Key {key_number}"),
        }
    }
}

/// Clear-all confirmation.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub cleared_count: u64,
}

/// Static service descriptor for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthPayload {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub environment: String,
}
