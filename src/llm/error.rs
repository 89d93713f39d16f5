use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("language model request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("language model returned an empty reply")]
    EmptyResponse,

    #[error("language model timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl From<genai::Error> for LlmError {
    fn from(err: genai::Error) -> Self {
        LlmError::RequestFailed {
            reason: err.to_string(),
        }
    }
}
