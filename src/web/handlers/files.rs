//! File handlers for the Web API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::media::{MediaFileUpdate, UploadRequest};
use crate::web::dto::{
    DownloadPayload, FileListPayload, FilePayload, FileUpdateResponse, MessageResponse,
    ThumbnailPayload, UpdateFileRequest, UploadFileRequest, UploadResponse, UserQuery,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::{AppState, DEFAULT_USER_ID};

/// POST /api/files/upload - Upload a base64 file payload.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<UploadFileRequest>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut request = UploadRequest::new(
        payload.file_data,
        payload.filename,
        payload.mime_type,
        payload.file_size,
    );
    request.title = payload.title;
    request.description = payload.description;
    request.user_id = payload.user_id;

    let file = state.media.upload(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            file: FilePayload::from(&file),
        }),
    ))
}

/// GET /api/files/download/:filename - Download a file as a data-URL.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<DownloadPayload>, ApiError> {
    let (bytes, mime_type) = state.media.download(&filename).await?;

    let data = format!("data:{mime_type};base64,{}", BASE64.encode(&bytes));

    Ok(Json(DownloadPayload {
        filename,
        mime_type,
        data,
        size: bytes.len(),
    }))
}

/// GET /api/files/thumbnail/:filename - Get a thumbnail as a data-URL.
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<ThumbnailPayload>, ApiError> {
    let bytes = state.media.thumbnail(&filename)?;

    Ok(Json(ThumbnailPayload {
        thumbnail: format!("data:image/jpeg;base64,{}", BASE64.encode(&bytes)),
    }))
}

/// GET /api/files/list - List the acting user's files, newest first.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<FileListPayload>, ApiError> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);

    let files = state.media.list(user_id).await?;
    let payloads: Vec<FilePayload> = files.iter().map(FilePayload::from).collect();

    Ok(Json(FileListPayload {
        count: payloads.len(),
        files: payloads,
    }))
}

/// GET /api/files/:id - Get file metadata.
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
) -> Result<Json<FilePayload>, ApiError> {
    let file = state.media.get(file_id).await?;
    Ok(Json(FilePayload::from(&file)))
}

/// PUT /api/files/:id - Update file metadata.
pub async fn update_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateFileRequest>,
) -> Result<Json<FileUpdateResponse>, ApiError> {
    let update = MediaFileUpdate {
        title: payload.title,
        description: payload.description,
        tags: payload.tags,
    };

    let file = state.media.update(file_id, &update).await?;

    Ok(Json(FileUpdateResponse {
        message: "File updated successfully".to_string(),
        file: FilePayload::from(&file),
    }))
}

/// DELETE /api/files/:id - Delete a file and release its storage.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.media.delete(file_id).await?;

    Ok(Json(MessageResponse::new("File deleted successfully")))
}
