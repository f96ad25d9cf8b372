//! Media file management module.
//!
//! This module provides file upload/download functionality including:
//! - Base64/data-URL payload decoding
//! - Extension allow-list and MIME-based type classification
//! - Per-user storage quota bookkeeping
//! - Thumbnail generation for images

mod category;
mod metadata;
mod service;
mod storage;
mod thumbnail;

pub use category::{classify, extension_of, FileCategory};
pub use metadata::{MediaFile, MediaFileUpdate, MediaRepository, NewMediaFile};
pub use service::{decode_payload, MediaService, UploadRequest};
pub use storage::MediaStorage;
pub use thumbnail::{generate as generate_thumbnail, Thumbnail};

/// Route prefix recorded as a file's storage location reference.
pub const DOWNLOAD_ROUTE_PREFIX: &str = "/api/files/download";

/// Route prefix recorded as a file's thumbnail location reference.
pub const THUMBNAIL_ROUTE_PREFIX: &str = "/api/files/thumbnail";

/// Longest thumbnail side in pixels.
pub const THUMBNAIL_MAX_DIM: u32 = 200;

/// JPEG quality for re-encoded thumbnails.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 85;
