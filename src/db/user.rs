//! User model for mediadeck.

use chrono::{DateTime, Utc};

/// Email used for the lazily provisioned placeholder user.
pub const DEFAULT_USER_EMAIL: &str = "default@mediadeck.local";

/// Display name used for the lazily provisioned placeholder user.
pub const DEFAULT_USER_NAME: &str = "Default User";

/// A registered user with storage quota bookkeeping.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Email address (unique).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Cumulative uploaded bytes.
    pub storage_used: i64,
    /// Storage ceiling in bytes.
    pub storage_limit: i64,
}

impl User {
    /// Remaining storage in bytes, never negative.
    pub fn storage_remaining(&self) -> i64 {
        (self.storage_limit - self.storage_used).max(0)
    }

    /// Whether an upload of `size` bytes fits under the ceiling.
    pub fn can_store(&self, size: i64) -> bool {
        self.storage_used + size <= self.storage_limit
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Storage ceiling in bytes.
    pub storage_limit: i64,
}

impl NewUser {
    /// Create a new user with the given storage ceiling.
    pub fn new(email: impl Into<String>, name: impl Into<String>, storage_limit: i64) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            storage_limit,
        }
    }
}
