use thiserror::Error;

use crate::retrieval::RetrievalError;

/// Message shown to guests for any fatal failure; the cause stays in logs.
pub const FRIENDLY_MESSAGE: &str =
    "Sorry, I couldn't search the wine list right now. Please try again in a moment.";

/// Failures that end a recommendation request.
///
/// Only retrieval can fail a request; model and cache problems are absorbed
/// by the arbiter and the enricher.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("request text must not be empty")]
    EmptyRequest,

    #[error("partition tag must not be empty")]
    EmptyPartition,

    #[error("candidate retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),
}

impl RecommendError {
    /// Machine-readable code for callers.
    pub fn code(&self) -> &'static str {
        match self {
            RecommendError::EmptyRequest | RecommendError::EmptyPartition => "invalid_request",
            RecommendError::Retrieval(
                RetrievalError::Embedding(_) | RetrievalError::EmbeddingTimeout { .. },
            ) => "embedding_unavailable",
            RecommendError::Retrieval(
                RetrievalError::Index(_) | RetrievalError::IndexTimeout { .. },
            ) => "catalog_unavailable",
        }
    }

    /// Whether the caller sent something unusable, as opposed to a service outage.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RecommendError::EmptyRequest | RecommendError::EmptyPartition)
    }

    /// Text safe to show a guest.
    pub fn user_message(&self) -> String {
        if self.is_invalid_input() {
            self.to_string()
        } else {
            FRIENDLY_MESSAGE.to_string()
        }
    }
}
