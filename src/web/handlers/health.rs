//! Health handler.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::web::dto::HealthPayload;
use crate::web::handlers::AppState;

/// GET /api/health - Static service descriptor.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthPayload> {
    Json(HealthPayload {
        status: "healthy",
        service: "mediadeck",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.clone(),
    })
}
