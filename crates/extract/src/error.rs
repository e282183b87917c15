use thiserror::Error;

/// Failure of one extraction run.
///
/// The first three variants are upstream call failures, the last two are
/// output validation failures. The HTTP layer maps both groups to an opaque
/// server error, so these messages only ever reach the logs.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Groq request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Groq returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Groq response contained no choices")]
    EmptyResponse,

    #[error("Model output is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Model output does not match the extraction schema: {0}")]
    SchemaMismatch(#[source] serde_json::Error),
}

impl ExtractError {
    /// True when the external API call itself failed.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ExtractError::Transport(_)
                | ExtractError::UpstreamStatus { .. }
                | ExtractError::EmptyResponse
        )
    }

    /// True when the call succeeded but the returned text was unusable.
    pub fn is_output_validation(&self) -> bool {
        matches!(
            self,
            ExtractError::InvalidJson(_) | ExtractError::SchemaMismatch(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
