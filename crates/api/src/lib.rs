pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod upload;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::warn;

use config::{API_KEY_VAR, AppConfig};
use extract::CertificateExtractor;

/// Shared, read-only state built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key was configured; extraction then fails fast.
    pub extractor: Option<Arc<CertificateExtractor>>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(extractor: Option<CertificateExtractor>, max_upload_bytes: usize) -> Self {
        Self {
            extractor: extractor.map(Arc::new),
            max_upload_bytes,
        }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let extractor = match &config.groq.api_key {
            Some(api_key) => Some(CertificateExtractor::groq(
                api_key.clone(),
                config.client_settings(),
            )?),
            None => {
                warn!(
                    "{} is not set. The API will start, but requests will fail until it is configured.",
                    API_KEY_VAR
                );
                None
            }
        };

        Ok(Self::new(extractor, config.server.max_upload_bytes))
    }
}

pub fn app(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/", get(routes::service_info))
        .route("/health", get(routes::health_check))
        .route(
            "/api/v1/extract_certificate_data",
            post(routes::extract_certificate_data),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}
