use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use extract::ExtractError;

pub const NOT_CONFIGURED_MESSAGE: &str = "Server is not configured. Missing GROQ_API_KEY.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Caller-side problem with the upload; the message is shown verbatim.
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("extraction requested but no API key was configured")]
    NotConfigured,

    #[error(transparent)]
    Extraction(#[from] ExtractError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotConfigured | ApiError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the caller gets to see. Upstream and validation detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(message) => *message,
            ApiError::NotConfigured => NOT_CONFIGURED_MESSAGE,
            ApiError::Extraction(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.public_message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
