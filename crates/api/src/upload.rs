use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::header;
use tracing::{error, warn};

use crate::error::ApiError;

pub const FILE_FIELD: &str = "file";
pub const SUPPORTED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

pub const NO_FILE_MESSAGE: &str = "No file uploaded.";
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Unsupported file type. Please upload a JPEG or PNG image.";
pub const READ_FAILED_MESSAGE: &str = "Failed to read uploaded file.";
pub const EMPTY_FILE_MESSAGE: &str = "Uploaded file is empty.";

/// A certificate image that passed input validation.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Exact match only: parameters or a different case make the type unsupported.
pub fn is_supported_content_type(content_type: &str) -> bool {
    SUPPORTED_CONTENT_TYPES.contains(&content_type)
}

/// Pull the `file` part out of a multipart upload and validate it.
///
/// Checks run in order: presence, declared type, read, emptiness.
pub async fn read_certificate_upload(mut multipart: Multipart) -> Result<UploadedImage, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ApiError::BadRequest(NO_FILE_MESSAGE)),
            Err(e) => {
                error!(error = %e, "Error reading multipart body");
                return Err(ApiError::BadRequest(READ_FAILED_MESSAGE));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ApiError::BadRequest(NO_FILE_MESSAGE)),
        };

        // Raw header, not the parsed mime, which is case-normalized.
        let declared = field
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        let content_type = match declared {
            Some(ct) if is_supported_content_type(ct) => ct.to_string(),
            other => {
                warn!(filename = %filename, content_type = ?other, "Rejected unsupported upload");
                return Err(ApiError::BadRequest(UNSUPPORTED_TYPE_MESSAGE));
            }
        };

        let bytes = field.bytes().await.map_err(|e| {
            error!(error = %e, filename = %filename, "Error reading uploaded file");
            ApiError::BadRequest(READ_FAILED_MESSAGE)
        })?;

        if bytes.is_empty() {
            return Err(ApiError::BadRequest(EMPTY_FILE_MESSAGE));
        }

        return Ok(UploadedImage {
            filename,
            content_type,
            bytes,
        });
    }
}
