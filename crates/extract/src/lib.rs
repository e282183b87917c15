pub mod encode;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod schema;

pub use error::{ExtractError, Result};
pub use llm::{ChatCompletion, ClientSettings, GroqClient};
pub use schema::{CertificateExtraction, ExtractionResponse, ExtractionStatus};

use std::sync::Arc;

use tracing::{error, info};

/// Runs one certificate image through encode, model call and output validation.
#[derive(Clone)]
pub struct CertificateExtractor {
    llm_client: Arc<dyn ChatCompletion>,
}

impl CertificateExtractor {
    pub fn new(llm_client: Arc<dyn ChatCompletion>) -> Self {
        Self { llm_client }
    }

    pub fn groq(api_key: impl Into<String>, settings: ClientSettings) -> Result<Self> {
        Ok(Self::new(Arc::new(GroqClient::new(api_key, settings)?)))
    }

    /// Extract school name and last class from an image of `content_type`.
    ///
    /// Makes exactly one model call. Failures are logged here with full
    /// detail, including the raw model output when it does not validate.
    pub async fn extract(&self, content_type: &str, image: &[u8]) -> Result<CertificateExtraction> {
        let data_url = encode::to_data_url(content_type, image);
        let messages = prompt::build_extraction_messages(&data_url);

        let raw = self.llm_client.complete_json(messages).await.map_err(|e| {
            error!(error = ?e, "Groq API call failed");
            e
        })?;
        let raw = raw.trim();

        let extraction = schema::parse_extraction(raw).map_err(|e| {
            error!(error = %e, raw_response = %raw, "LLM output validation failed");
            e
        })?;

        info!(
            content_type,
            image_bytes = image.len(),
            "extracted certificate data"
        );

        Ok(extraction)
    }
}
