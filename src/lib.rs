//! Sommelier library crate (used by the server and integration tests).
//!
//! Turns a guest's free-text wine request into two recommendations:
//!
//! 1. [`constraint`] extracts price language into a [`PriceConstraint`].
//! 2. [`retrieval`] embeds the request and runs one filtered similarity search.
//! 3. [`arbiter`] asks the language model for two picks, falling back to the
//!    top two by score.
//! 4. [`enrichment`] resolves tasting notes (and pairings when requested)
//!    through a cached fallback chain that always yields text.
//!
//! [`Recommender`] wires the stages together; [`gateway`] exposes it over HTTP.
//!
//! ## Test/Mock Support
//! Mock implementations of every external service are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod arbiter;
pub mod cache;
pub mod config;
pub mod constants;
pub mod constraint;
pub mod embedding;
pub mod enrichment;
pub mod gateway;
pub mod hashing;
pub mod llm;
pub mod pipeline;
pub mod retrieval;
pub mod vectordb;

pub use arbiter::{Selection, SelectionArbiter, SelectionSource};
pub use cache::{CacheEntry, CacheError, TextCache};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use constraint::{
    ConstraintParser, ParsedRequest, PriceBucket, PriceConstraint, PriceTag, PriceThresholds,
    parse_request, wants_pairing,
};
pub use embedding::{EmbeddingBackend, EmbeddingError, EmbeddingService, HttpEmbedder};
pub use enrichment::{EnrichedResult, Enricher, EnrichmentConfig, NoteSource, PairingSource};
pub use hashing::{catalog_point_id, hash_to_u64, short_digest};
pub use llm::{ChatBackend, GenaiModel, LanguageModel, LlmError};
pub use pipeline::{RecommendError, Recommendation, Recommender, RecommenderConfig};
pub use retrieval::{RetrievalError, Retriever, RetrieverConfig};
pub use vectordb::{Candidate, CatalogBackend, CatalogError, CatalogIndex, CatalogItem, QdrantCatalog};

#[cfg(any(test, feature = "mock"))]
pub use cache::MockCacheBackend;
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use llm::MockLanguageModel;
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockCatalog;
