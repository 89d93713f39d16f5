//! OpenAI-compatible embeddings client.

use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, instrument};

use super::config::EmbedderConfig;
use super::error::EmbeddingError;
use crate::constants::validate_embedding_dim;

/// Embeds text via `POST {api_base}/embeddings`.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    http: HttpClient,
    config: EmbedderConfig,
}

impl HttpEmbedder {
    pub fn new(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    #[instrument(skip(self, text), fields(text_len = text.len(), model = %self.config.model))]
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let body = serde_json::json!({
            "model": self.config.model,
            "input": [text],
            "dimensions": self.config.dimensions,
        });

        let mut request = self.http.post(self.config.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EmbeddingError::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                EmbeddingError::from(e)
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EmbeddingError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = resp.json().await?;
        let vector = parse_embedding_response(json)?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse {
                reason: "response contained no embeddings".to_string(),
            })?;

        validate_embedding_dim(vector.len(), self.config.dimensions)?;
        debug!(dim = vector.len(), "Embedding received");
        Ok(vector)
    }
}

/// Extracts `data[].embedding`, ordered by `index`.
pub(crate) fn parse_embedding_response(json: Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let data = json
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| EmbeddingError::InvalidResponse {
            reason: "missing data array".to_string(),
        })?;

    let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());
    for (fallback_index, item) in data.iter().enumerate() {
        let index = item
            .get("index")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(fallback_index);
        let values = item
            .get("embedding")
            .and_then(|v| v.as_array())
            .ok_or_else(|| EmbeddingError::InvalidResponse {
                reason: "item missing embedding array".to_string(),
            })?;

        let vector = values
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|n| n as f32)
                    .ok_or_else(|| EmbeddingError::InvalidResponse {
                        reason: "embedding value must be numeric".to_string(),
                    })
            })
            .collect::<Result<Vec<f32>, _>>()?;
        indexed.push((index, vector));
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, v)| v).collect())
}
