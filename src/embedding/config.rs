use std::time::Duration;

use crate::config::Config;
use crate::embedding::error::EmbeddingError;

#[derive(Clone)]
/// Configuration for [`HttpEmbedder`](super::HttpEmbedder).
pub struct EmbedderConfig {
    /// Base URL of an OpenAI-compatible API (`.../v1`).
    pub api_base: String,
    /// Bearer token; omitted from requests when `None`.
    pub api_key: Option<String>,
    /// Embedding model name.
    pub model: String,
    /// Requested (and enforced) output dimension.
    pub dimensions: usize,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl EmbedderConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_base: config.embedding_url.clone(),
            api_key: config.embedding_api_key.clone(),
            model: config.embedding_model.clone(),
            dimensions: config.embedding_dim,
            timeout: config.embedding_timeout,
        }
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.api_base.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "api_base is empty".to_string(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model is empty".to_string(),
            });
        }
        if self.dimensions == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "dimensions must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Full URL of the embeddings endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/embeddings", self.api_base.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for EmbedderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbedderConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("dimensions", &self.dimensions)
            .field("timeout", &self.timeout)
            .finish()
    }
}
