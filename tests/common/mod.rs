//! Shared helpers for Web API integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{ImageFormat, RgbImage};
use tempfile::TempDir;

use mediadeck::config::ProxyConfig;
use mediadeck::db::{Database, NewUser, UserRepository};
use mediadeck::media::MediaStorage;
use mediadeck::proxy::Forwarder;
use mediadeck::web::handlers::AppState;
use mediadeck::web::router::create_router;

/// Default per-user quota in tests (1 GiB).
pub const GIB: i64 = 1024 * 1024 * 1024;

/// Proxy configuration with two known collections.
pub fn test_proxy_config(base_url: &str) -> ProxyConfig {
    let mut collections = HashMap::new();
    collections.insert("media_assets".to_string(), "col-media-1".to_string());
    collections.insert("hotkey_assignments".to_string(), "col-keys-2".to_string());

    ProxyConfig {
        api_base_url: base_url.to_string(),
        api_token: "test-token".to_string(),
        collections,
        timeout_secs: 2,
    }
}

/// Create a test server with an in-memory database and temp storage.
pub async fn create_test_server() -> (TestServer, Arc<Database>, TempDir) {
    create_test_server_with_proxy(test_proxy_config("https://cms.invalid")).await
}

/// Create a test server pointing the proxy at a specific upstream.
pub async fn create_test_server_with_proxy(
    proxy: ProxyConfig,
) -> (TestServer, Arc<Database>, TempDir) {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = MediaStorage::new(temp_dir.path()).expect("Failed to create storage");
    let forwarder = Forwarder::new(proxy).expect("Failed to create forwarder");

    let app_state = Arc::new(AppState::new(db.clone(), storage, forwarder, GIB, "test"));

    let server = TestServer::new(create_router(app_state)).expect("Failed to create test server");

    (server, db, temp_dir)
}

/// Register a user directly in the database, returning its ID.
pub async fn create_user(db: &Database, email: &str, storage_limit: i64) -> i64 {
    UserRepository::new(db.pool())
        .create(&NewUser::new(email, "Test User", storage_limit))
        .await
        .expect("Failed to create test user")
        .id
}

/// A small solid-color PNG as a data-URL.
pub fn png_data_url(width: u32, height: u32) -> String {
    let img = RgbImage::from_pixel(width, height, image::Rgb([40, 90, 200]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    format!("data:image/png;base64,{}", BASE64.encode(buf.into_inner()))
}

/// Arbitrary bytes as a bare base64 payload.
pub fn base64_payload(content: &[u8]) -> String {
    BASE64.encode(content)
}

/// Decode a `data:<mime>;base64,<payload>` string back into bytes.
pub fn decode_data_url(data_url: &str) -> Vec<u8> {
    let (_, payload) = data_url.split_once(',').expect("not a data-URL");
    BASE64.decode(payload).expect("invalid base64 in data-URL")
}

/// Read a user's storage_used straight from the database.
pub async fn storage_used(db: &Database, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT storage_used FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(db.pool())
        .await
        .expect("user row missing")
}
