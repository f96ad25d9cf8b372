//! Router configuration for the Web API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    assign_key, clear_assignments, delete_file, download_file, forward_proxy, get_assignment,
    get_file, get_thumbnail, health, list_assignments, list_files, proxy_probe, unassign_key,
    update_assignment, update_file, upload_file, AppState,
};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let file_routes = Router::new()
        .route("/upload", post(upload_file))
        .route("/download/:filename", get(download_file))
        .route("/thumbnail/:filename", get(get_thumbnail))
        .route("/list", get(list_files))
        .route(
            "/:id",
            get(get_file).put(update_file).delete(delete_file),
        );

    let api_routes = Router::new()
        .route("/assign", post(assign_key))
        .route("/assignments", get(list_assignments))
        .route(
            "/assignments/:key_number",
            get(get_assignment)
                .put(update_assignment)
                .delete(unassign_key),
        )
        .route("/clear", post(clear_assignments))
        .route("/health", get(health))
        .nest("/files", file_routes);

    Router::new()
        .route("/webflow_proxy", post(forward_proxy).get(proxy_probe))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer()),
        )
        .with_state(app_state)
}

/// Permissive CORS layer; origin policy is deployment configuration.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
