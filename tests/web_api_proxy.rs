//! Web API proxy tests.
//!
//! Integration tests for the forwarding endpoint and the health
//! descriptors, using a stub upstream bound to a random local port.

mod common;

use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use common::*;

/// Spawn a stub upstream CMS on a random port.
async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_proxy_probe_does_not_contact_upstream() {
    // The upstream base URL points nowhere reachable on purpose
    let (server, _db, _tmp) = create_test_server().await;

    let response = server.get("/webflow_proxy").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_proxy_unknown_collection_names_key() {
    let (server, _db, _tmp) = create_test_server().await;

    let response = server
        .post("/webflow_proxy")
        .json(&json!({"endpoint": "unknown_key"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("unknown_key"));
}

#[tokio::test]
async fn test_proxy_missing_endpoint() {
    let (server, _db, _tmp) = create_test_server().await;

    let response = server.post("/webflow_proxy").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Endpoint key is missing");
}

#[tokio::test]
async fn test_proxy_unsupported_method() {
    let (server, _db, _tmp) = create_test_server().await;

    let response = server
        .post("/webflow_proxy")
        .json(&json!({"endpoint": "media_assets", "method": "TRACE"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_proxy_passes_through_upstream_body() {
    let upstream = Router::new().route(
        "/collections/col-media-1/items",
        get(|| async {
            axum::Json(json!({"items": [{"id": "x1"}, {"id": "x2"}], "total": 2}))
        }),
    );
    let addr = spawn_upstream(upstream).await;

    let (server, _db, _tmp) =
        create_test_server_with_proxy(test_proxy_config(&format!("http://{addr}"))).await;

    let response = server
        .post("/webflow_proxy")
        .json(&json!({"endpoint": "media_assets", "method": "GET"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_proxy_synthesizes_empty_collection_envelope() {
    let upstream = Router::new().route(
        "/collections/col-media-1/items",
        get(|| async { StatusCode::NO_CONTENT }),
    );
    let addr = spawn_upstream(upstream).await;

    let (server, _db, _tmp) =
        create_test_server_with_proxy(test_proxy_config(&format!("http://{addr}"))).await;

    let response = server
        .post("/webflow_proxy")
        .json(&json!({"endpoint": "media_assets"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["count"], 0);
    assert_eq!(body["limit"], 100);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_proxy_synthesizes_success_for_item_delete() {
    let upstream = Router::new().route(
        "/collections/col-keys-2/items/item-3",
        delete(|| async { StatusCode::NO_CONTENT }),
    );
    let addr = spawn_upstream(upstream).await;

    let (server, _db, _tmp) =
        create_test_server_with_proxy(test_proxy_config(&format!("http://{addr}"))).await;

    let response = server
        .post("/webflow_proxy")
        .json(&json!({"endpoint": "hotkey_assignments/item-3", "method": "DELETE"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_proxy_upstream_failure_is_internal_with_details() {
    let upstream = Router::new().route(
        "/collections/col-media-1/items",
        get(|| async { (StatusCode::BAD_GATEWAY, "cms exploded") }),
    );
    let addr = spawn_upstream(upstream).await;

    let (server, _db, _tmp) =
        create_test_server_with_proxy(test_proxy_config(&format!("http://{addr}"))).await;

    let response = server
        .post("/webflow_proxy")
        .json(&json!({"endpoint": "media_assets"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "API request failed");
    assert!(body["details"].as_str().unwrap().contains("cms exploded"));
}

#[tokio::test]
async fn test_proxy_timeout_maps_to_gateway_timeout() {
    let upstream = Router::new().route(
        "/collections/col-media-1/items",
        get(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(10)).await;
            "too late"
        }),
    );
    let addr = spawn_upstream(upstream).await;

    let mut proxy = test_proxy_config(&format!("http://{addr}"));
    proxy.timeout_secs = 1;
    let (server, _db, _tmp) = create_test_server_with_proxy(proxy).await;

    let response = server
        .post("/webflow_proxy")
        .json(&json!({"endpoint": "media_assets"}))
        .await;

    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_api_health_descriptor() {
    let (server, _db, _tmp) = create_test_server().await;

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mediadeck");
    assert_eq!(body["environment"], "test");
    assert!(!body["version"].as_str().unwrap().is_empty());
}
