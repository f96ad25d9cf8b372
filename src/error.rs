//! Error types for mediadeck.

use thiserror::Error;

/// Common error type for mediadeck.
#[derive(Error, Debug)]
pub enum MediadeckError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from sqlx.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Base64/data-URL payload could not be decoded.
    #[error("invalid file payload: {0}")]
    InvalidPayload(String),

    /// File extension is not in the allow-list.
    #[error("file type not allowed: {0}")]
    UnsupportedFileType(String),

    /// Key number outside the valid 1..=5 range.
    #[error("key number must be between 1 and 5, got {0}")]
    InvalidKeyNumber(i64),

    /// Upload would push the user past their storage ceiling.
    #[error("storage limit exceeded")]
    QuotaExceeded {
        /// Bytes already used by the owner.
        used: i64,
        /// The owner's storage ceiling in bytes.
        limit: i64,
        /// Size of the rejected upload.
        requested: i64,
    },

    /// Cross-user access to a resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Proxy endpoint key does not resolve to a collection.
    #[error("invalid endpoint key: {0}")]
    UnknownCollection(String),

    /// Upstream CMS call exceeded its timeout.
    #[error("upstream request timed out: {0}")]
    UpstreamTimeout(String),

    /// Upstream CMS call failed (transport error or non-2xx status).
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for MediadeckError {
    fn from(e: sqlx::Error) -> Self {
        MediadeckError::Database(e.to_string())
    }
}

/// Result type alias for mediadeck operations.
pub type Result<T> = std::result::Result<T, MediadeckError>;
