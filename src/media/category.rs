//! Coarse file type classification for uploads.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::{MediadeckError, Result};

/// Allowed image extensions.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "tiff"];

/// Allowed video extensions.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "avi", "mov", "wmv", "flv", "mkv"];

/// Allowed audio extensions. "ogg" also appears in the video group,
/// which is checked first and wins.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "flac", "m4a", "wma", "ogg"];

/// Allowed document extensions.
const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "txt", "md", "json", "xml", "html", "css", "js", "csv",
];

/// Coarse file type category, stored as uppercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Pdf,
    Text,
    Document,
}

impl FileCategory {
    /// Database/wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Image => "IMAGE",
            FileCategory::Video => "VIDEO",
            FileCategory::Audio => "AUDIO",
            FileCategory::Pdf => "PDF",
            FileCategory::Text => "TEXT",
            FileCategory::Document => "DOCUMENT",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IMAGE" => Ok(FileCategory::Image),
            "VIDEO" => Ok(FileCategory::Video),
            "AUDIO" => Ok(FileCategory::Audio),
            "PDF" => Ok(FileCategory::Pdf),
            "TEXT" => Ok(FileCategory::Text),
            "DOCUMENT" => Ok(FileCategory::Document),
            _ => Err(format!("unknown file category: {s}")),
        }
    }
}

/// Extract the lowercased extension from a filename, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

/// Classify an extension against the allow-list.
///
/// Groups are checked in image, video, audio, document order.
fn from_extension(ext: &str) -> Option<FileCategory> {
    if IMAGE_EXTENSIONS.contains(&ext) {
        Some(FileCategory::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        Some(FileCategory::Video)
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        Some(FileCategory::Audio)
    } else if DOCUMENT_EXTENSIONS.contains(&ext) {
        Some(FileCategory::Document)
    } else {
        None
    }
}

/// Classify by MIME type prefix. Never fails; unknown types are DOCUMENT.
fn from_mime(mime_type: &str) -> FileCategory {
    if mime_type.starts_with("image/") {
        FileCategory::Image
    } else if mime_type.starts_with("video/") {
        FileCategory::Video
    } else if mime_type.starts_with("audio/") {
        FileCategory::Audio
    } else if mime_type == "application/pdf" {
        FileCategory::Pdf
    } else if mime_type.starts_with("text/") {
        FileCategory::Text
    } else {
        FileCategory::Document
    }
}

/// Determine the coarse category for an upload.
///
/// The extension allow-list decides first. An extension that is present
/// but not in the allow-list is rejected outright, with no MIME
/// fallback. Only files without an extension fall back to MIME prefix
/// sniffing.
pub fn classify(filename: &str, mime_type: &str) -> Result<FileCategory> {
    match extension_of(filename) {
        Some(ext) => from_extension(&ext)
            .ok_or_else(|| MediadeckError::UnsupportedFileType(filename.to_string())),
        None => Ok(from_mime(mime_type)),
    }
}
