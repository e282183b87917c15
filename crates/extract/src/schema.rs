use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Fields read off a School Leaving Certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateExtraction {
    /// Full, official name of the school or institution.
    pub school_name: String,
    /// Last class, standard or grade attended, e.g. "10th Standard", "Class XII".
    pub last_class_attended: String,
}

/// Status tag of a successful extraction. Only ever `"success"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    #[default]
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub status: ExtractionStatus,
    pub data: CertificateExtraction,
}

impl ExtractionResponse {
    pub fn success(data: CertificateExtraction) -> Self {
        Self {
            status: ExtractionStatus::Success,
            data,
        }
    }
}

/// Parse raw model output into a [`CertificateExtraction`].
///
/// Surrounding whitespace is ignored. The output must be a JSON object: extra
/// keys are tolerated, but both fields must be present and be strings.
pub fn parse_extraction(raw: &str) -> Result<CertificateExtraction> {
    let value: serde_json::Value =
        serde_json::from_str(raw.trim()).map_err(ExtractError::InvalidJson)?;

    // Derived struct deserialization also accepts sequences; only keyed objects count.
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_value(value).map_err(ExtractError::SchemaMismatch)?;

    serde_json::from_value(serde_json::Value::Object(object)).map_err(ExtractError::SchemaMismatch)
}
