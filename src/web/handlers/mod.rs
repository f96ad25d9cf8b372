//! API handlers for the Web API.

pub mod assignments;
pub mod files;
pub mod health;
pub mod proxy;

pub use assignments::*;
pub use files::*;
pub use health::*;
pub use proxy::*;

use std::sync::Arc;

use crate::assignment::AssignmentService;
use crate::db::Database;
use crate::media::{MediaService, MediaStorage};
use crate::proxy::Forwarder;

/// Acting user when a request names none.
///
/// A shortcut around proper multi-tenant auth, kept as the original
/// wire contract requires; the placeholder user provisioned on first
/// upload receives this ID on a fresh database.
pub const DEFAULT_USER_ID: i64 = 1;

/// Shared application state.
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
    /// Media file service.
    pub media: MediaService,
    /// Key assignment service.
    pub assignments: AssignmentService,
    /// Upstream CMS forwarder.
    pub forwarder: Forwarder,
    /// Deployment environment label for the health endpoint.
    pub environment: String,
}

impl AppState {
    /// Create application state from its parts.
    pub fn new(
        db: Arc<Database>,
        storage: MediaStorage,
        forwarder: Forwarder,
        default_storage_limit: i64,
        environment: impl Into<String>,
    ) -> Self {
        let media = MediaService::new(db.clone(), storage, default_storage_limit);
        let assignments = AssignmentService::new(db.clone());

        Self {
            db,
            media,
            assignments,
            forwarder,
            environment: environment.into(),
        }
    }
}
