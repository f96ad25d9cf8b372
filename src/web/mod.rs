//! Web API module for mediadeck.
//!
//! Provides the REST surface over the media, assignment and proxy
//! services.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
