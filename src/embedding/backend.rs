use std::future::Future;

use super::error::EmbeddingError;
use super::http::HttpEmbedder;

#[cfg(any(test, feature = "mock"))]
use super::mock::MockEmbedder;

/// Turns text into a fixed-dimension vector.
pub trait EmbeddingService: Send + Sync {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;
}

#[derive(Debug, Clone)]
/// Embedding backend wrapper (HTTP or mock).
pub enum EmbeddingBackend {
    Http(HttpEmbedder),
    #[cfg(any(test, feature = "mock"))]
    Mock(MockEmbedder),
}

impl EmbeddingService for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        HttpEmbedder::embed(self, text).await
    }
}

#[cfg(any(test, feature = "mock"))]
impl EmbeddingService for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        MockEmbedder::embed(self, text).await
    }
}

impl EmbeddingService for EmbeddingBackend {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match self {
            EmbeddingBackend::Http(e) => e.embed(text).await,
            #[cfg(any(test, feature = "mock"))]
            EmbeddingBackend::Mock(e) => e.embed(text).await,
        }
    }
}
