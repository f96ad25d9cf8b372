//! mediadeck - media library backend
//!
//! A small backend providing a proxying layer over a third-party
//! content-management API, a CRUD service for media file uploads with
//! per-user storage quotas, and a registry binding five numbered key
//! slots per user to uploaded files.

pub mod assignment;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod media;
pub mod proxy;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{MediadeckError, Result};
