//! Proxy handlers for the Web API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::web::dto::{ProxyRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /webflow_proxy - Forward a simplified request to the upstream CMS.
///
/// The upstream status code and JSON body pass through verbatim.
pub async fn forward_proxy(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<ProxyRequest>,
) -> Result<Response, ApiError> {
    let endpoint = payload
        .endpoint
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Endpoint key is missing"))?;

    let outcome = state
        .forwarder
        .forward(endpoint, &payload.method, payload.body.as_ref())
        .await?;

    let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::OK);
    Ok((status, Json(outcome.body)).into_response())
}

/// GET /webflow_proxy - Health probe that never contacts the upstream.
pub async fn proxy_probe() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}
