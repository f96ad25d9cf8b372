//! Key assignment handlers for the Web API.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::assignment::{AssignStatus, AssignmentChanges};
use crate::web::dto::{
    AssignKeyRequest, AssignResponse, AssignmentMapPayload, AssignmentPayload, ClearResponse,
    MessageResponse, UpdateAssignmentRequest, UserQuery, VacantSlotPayload, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::{AppState, DEFAULT_USER_ID};

/// POST /api/assign - Bind a file to a key slot.
///
/// Creating a fresh binding returns 201; replacing an occupied slot
/// returns 200.
pub async fn assign_key(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<AssignKeyRequest>,
) -> Result<Response, ApiError> {
    let user_id = payload.user_id.unwrap_or(DEFAULT_USER_ID);

    let (resolved, status) = state
        .assignments
        .assign(
            user_id,
            payload.file_id,
            payload.key_number,
            payload.custom_title.as_deref(),
            payload.custom_description.as_deref(),
        )
        .await?;

    let key_number = resolved.assignment.key_number;
    let (http_status, message) = match status {
        AssignStatus::Created => (
            StatusCode::CREATED,
            format!("File assigned to Key {key_number} successfully"),
        ),
        AssignStatus::Updated => (
            StatusCode::OK,
            format!("Key {key_number} assignment updated successfully"),
        ),
    };

    let body = AssignResponse {
        message,
        assignment: AssignmentPayload::from(&resolved),
    };

    Ok((http_status, Json(body)).into_response())
}

/// GET /api/assignments - Dense map over every key slot.
pub async fn list_assignments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<AssignmentMapPayload>, ApiError> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);

    let slots = state.assignments.get_all(user_id).await?;

    let count = slots.values().filter(|slot| slot.is_some()).count();
    let assignments: BTreeMap<String, Option<AssignmentPayload>> = slots
        .into_iter()
        .map(|(key, slot)| (key.to_string(), slot.as_ref().map(AssignmentPayload::from)))
        .collect();

    Ok(Json(AssignmentMapPayload { assignments, count }))
}

/// GET /api/assignments/:key_number - One slot, with an explicit
/// not-assigned body for vacant slots.
pub async fn get_assignment(
    State(state): State<Arc<AppState>>,
    Path(key_number): Path<i64>,
    Query(query): Query<UserQuery>,
) -> Result<Response, ApiError> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);

    match state.assignments.get_one(user_id, key_number).await? {
        Some(resolved) => Ok(Json(AssignmentPayload::from(&resolved)).into_response()),
        None => Ok(Json(VacantSlotPayload::new(key_number)).into_response()),
    }
}

/// PUT /api/assignments/:key_number - Update display overrides.
pub async fn update_assignment(
    State(state): State<Arc<AppState>>,
    Path(key_number): Path<i64>,
    Query(query): Query<UserQuery>,
    ValidatedJson(payload): ValidatedJson<UpdateAssignmentRequest>,
) -> Result<Json<AssignResponse>, ApiError> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);

    let changes = AssignmentChanges {
        custom_title: payload.custom_title,
        custom_description: payload.custom_description,
    };

    let resolved = state
        .assignments
        .update(user_id, key_number, &changes)
        .await?;

    Ok(Json(AssignResponse {
        message: format!("Key {key_number} assignment updated successfully"),
        assignment: AssignmentPayload::from(&resolved),
    }))
}

/// DELETE /api/assignments/:key_number - Unassign a slot.
///
/// A vacant slot is a non-error; the body says whether a binding was
/// removed.
pub async fn unassign_key(
    State(state): State<Arc<AppState>>,
    Path(key_number): Path<i64>,
    Query(query): Query<UserQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);

    let removed = state.assignments.unassign(user_id, key_number).await?;

    let message = if removed {
        format!("Key {key_number} unassigned successfully")
    } else {
        format!("Key {key_number} was not assigned")
    };

    Ok(Json(MessageResponse::new(message)))
}

/// POST /api/clear - Remove every assignment for the acting user.
pub async fn clear_assignments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ClearResponse>, ApiError> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);

    let cleared_count = state.assignments.clear_all(user_id).await?;

    Ok(Json(ClearResponse {
        message: format!("All assignments cleared for user {user_id}"),
        cleared_count,
    }))
}
