use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use extract::ExtractionResponse;

use crate::AppState;
use crate::error::ApiError;
use crate::upload::{self, NO_FILE_MESSAGE};

pub const API_TITLE: &str = "School Leaving Certificate Data Extractor API";
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const API_DESCRIPTION: &str = "Extracts School Name and Last Class/Standard Attended from an uploaded \
School Leaving Certificate image using Groq Llama 4 Scout in JSON Mode.";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        title: API_TITLE.to_string(),
        version: API_VERSION.to_string(),
        description: API_DESCRIPTION.to_string(),
    })
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `POST /api/v1/extract_certificate_data`
pub async fn extract_certificate_data(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractionResponse>, ApiError> {
    let multipart = multipart.map_err(|rejection| {
        warn!(error = %rejection, "Request is not a multipart upload");
        ApiError::BadRequest(NO_FILE_MESSAGE)
    })?;

    let image = upload::read_certificate_upload(multipart).await?;

    // Checked after input validation, so bad uploads are still 400s.
    let extractor = state.extractor.as_ref().ok_or(ApiError::NotConfigured)?;

    info!(
        filename = %image.filename,
        content_type = %image.content_type,
        size = image.bytes.len(),
        "extracting certificate data"
    );

    let extraction = extractor
        .extract(&image.content_type, &image.bytes)
        .await?;

    Ok(Json(ExtractionResponse::success(extraction)))
}
