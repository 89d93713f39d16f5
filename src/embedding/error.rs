use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding input is empty")]
    EmptyInput,

    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("embedding service returned {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("invalid embedding response: {reason}")]
    InvalidResponse { reason: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("invalid embedding configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::RequestFailed {
            reason: err.to_string(),
        }
    }
}

impl From<crate::constants::DimValidationError> for EmbeddingError {
    fn from(err: crate::constants::DimValidationError) -> Self {
        use crate::constants::DimValidationError;
        match err {
            DimValidationError::ZeroDimension => EmbeddingError::InvalidResponse {
                reason: "embedding vector is empty".to_string(),
            },
            DimValidationError::DimensionMismatch { expected, actual } => {
                EmbeddingError::DimensionMismatch { expected, actual }
            }
        }
    }
}
