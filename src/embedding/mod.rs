//! Text embedding.
//!
//! - [`HttpEmbedder`] calls an OpenAI-compatible `/embeddings` endpoint.
//! - [`MockEmbedder`] is a deterministic stand-in for tests.

mod backend;
/// Embedder configuration.
pub mod config;
mod error;
mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;


pub use backend::{EmbeddingBackend, EmbeddingService};
pub use config::EmbedderConfig;
pub use error::EmbeddingError;
pub use http::HttpEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
