//! Request DTOs for the Web API.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// File upload request.
///
/// `file_data` carries the base64 payload, optionally prefixed with a
/// data-URL header.
#[derive(Debug, Deserialize, Validate)]
pub struct UploadFileRequest {
    /// Base64-encoded file content.
    #[validate(length(min = 1, message = "file_data must not be empty"))]
    pub file_data: String,
    /// Original filename.
    #[validate(length(min = 1, max = 255, message = "filename must be 1-255 characters"))]
    pub filename: String,
    /// MIME type reported by the client.
    #[validate(length(min = 1, max = 100, message = "mime_type must be 1-100 characters"))]
    pub mime_type: String,
    /// File size in bytes.
    #[serde(default)]
    #[validate(range(min = 0, message = "file_size must not be negative"))]
    pub file_size: i64,
    /// Display title.
    #[serde(default)]
    #[validate(length(max = 200, message = "title must be at most 200 characters"))]
    pub title: Option<String>,
    /// Description.
    #[serde(default)]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    /// Owning user; the placeholder user is used when unset.
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Partial metadata update for a file.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFileRequest {
    /// New title.
    #[serde(default)]
    #[validate(length(max = 200, message = "title must be at most 200 characters"))]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    /// New tag list (ordered).
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Key assignment request.
#[derive(Debug, Deserialize, Validate)]
pub struct AssignKeyRequest {
    /// Owning user; defaults to the placeholder user.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// File to bind.
    pub file_id: i64,
    /// Key slot number (1..=5).
    pub key_number: i64,
    /// Title override.
    #[serde(default)]
    #[validate(length(max = 200, message = "custom_title must be at most 200 characters"))]
    pub custom_title: Option<String>,
    /// Description override.
    #[serde(default)]
    #[validate(length(max = 2000, message = "custom_description must be at most 2000 characters"))]
    pub custom_description: Option<String>,
}

/// Partial update of an assignment's display overrides.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAssignmentRequest {
    /// New title override.
    #[serde(default)]
    #[validate(length(max = 200, message = "custom_title must be at most 200 characters"))]
    pub custom_title: Option<String>,
    /// New description override.
    #[serde(default)]
    #[validate(length(max = 2000, message = "custom_description must be at most 2000 characters"))]
    pub custom_description: Option<String>,
}

/// Simplified proxy request forwarded to the upstream CMS.
#[derive(Debug, Deserialize, Validate)]
pub struct ProxyRequest {
    /// Bare collection key, or `<collection_key>/<item_id>`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// HTTP method, defaulting to GET.
    #[serde(default = "default_method")]
    pub method: String,
    /// JSON body to pass through.
    #[serde(default)]
    pub body: Option<Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Query string carrying the acting user.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Acting user; defaults to the placeholder user.
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_request_minimal_json() {
        let request: UploadFileRequest = serde_json::from_str(
            r#"{"file_data": "aGVsbG8=", "filename": "a.txt", "mime_type": "text/plain"}"#,
        )
        .unwrap();

        assert_eq!(request.file_size, 0);
        assert!(request.title.is_none());
        assert!(request.user_id.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_upload_request_missing_required_field() {
        let result: Result<UploadFileRequest, _> =
            serde_json::from_str(r#"{"filename": "a.txt", "mime_type": "text/plain"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_upload_request_validation_failures() {
        let request: UploadFileRequest = serde_json::from_str(
            r#"{"file_data": "", "filename": "a.txt", "mime_type": "text/plain", "file_size": -1}"#,
        )
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("file_data"));
        assert!(fields.contains_key("file_size"));
    }

    #[test]
    fn test_proxy_request_method_defaults_to_get() {
        let request: ProxyRequest =
            serde_json::from_str(r#"{"endpoint": "media_assets"}"#).unwrap();
        assert_eq!(request.method, "GET");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_assign_request_requires_file_and_key() {
        let result: Result<AssignKeyRequest, _> = serde_json::from_str(r#"{"file_id": 1}"#);
        assert!(result.is_err());

        let request: AssignKeyRequest =
            serde_json::from_str(r#"{"file_id": 1, "key_number": 3}"#).unwrap();
        assert_eq!(request.key_number, 3);
        assert!(request.user_id.is_none());
    }
}
