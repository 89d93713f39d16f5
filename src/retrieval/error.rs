use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vectordb::CatalogError;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding failed: {0}")]
    Embedding(#[source] EmbeddingError),

    #[error("embedding timed out after {timeout_ms}ms")]
    EmbeddingTimeout { timeout_ms: u64 },

    #[error("catalog search failed: {0}")]
    Index(#[source] CatalogError),

    #[error("catalog search timed out after {timeout_ms}ms")]
    IndexTimeout { timeout_ms: u64 },
}
