//! Candidate retrieval: embed the query, then one filtered similarity search.
//!
//! Both calls are sequential and time-bounded. Either failing fails the
//! request: a degraded vector would return plausible but wrong wines, and an
//! empty result would be indistinguishable from "nothing matched".

mod error;

#[cfg(test)]
mod tests;

pub use error::RetrievalError;

use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::constants::{DEFAULT_EMBEDDING_TIMEOUT, DEFAULT_INDEX_TIMEOUT, DEFAULT_TOP_K};
use crate::constraint::{PriceConstraint, PriceThresholds};
use crate::embedding::EmbeddingService;
use crate::vectordb::{Candidate, CatalogFilter, CatalogIndex};

/// Default and per-call limits for [`Retriever`].
#[derive(Debug, Clone, Copy)]
pub struct RetrieverConfig {
    pub top_k: u64,
    pub embedding_timeout: Duration,
    pub index_timeout: Duration,
    /// Bucket edges for tag-only constraints.
    pub thresholds: PriceThresholds,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            embedding_timeout: DEFAULT_EMBEDDING_TIMEOUT,
            index_timeout: DEFAULT_INDEX_TIMEOUT,
            thresholds: PriceThresholds::default(),
        }
    }
}

pub struct Retriever<E, I> {
    embedder: E,
    index: I,
    config: RetrieverConfig,
}

impl<E, I> Retriever<E, I>
where
    E: EmbeddingService,
    I: CatalogIndex,
{
    pub fn new(embedder: E, index: I, config: RetrieverConfig) -> Self {
        Self {
            embedder,
            index,
            config,
        }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Embeds `text` under the embedding timeout.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, RetrievalError> {
        tokio::time::timeout(self.config.embedding_timeout, self.embedder.embed(text))
            .await
            .map_err(|_| RetrievalError::EmbeddingTimeout {
                timeout_ms: self.config.embedding_timeout.as_millis() as u64,
            })?
            .map_err(RetrievalError::Embedding)
    }

    /// Searches `partition` with a precomputed vector under the index timeout.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        filter: &CatalogFilter,
        partition: &str,
        top_k: u64,
    ) -> Result<Vec<Candidate>, RetrievalError> {
        tokio::time::timeout(
            self.config.index_timeout,
            self.index.query(vector, filter, partition, top_k),
        )
        .await
        .map_err(|_| RetrievalError::IndexTimeout {
            timeout_ms: self.config.index_timeout.as_millis() as u64,
        })?
        .map_err(RetrievalError::Index)
    }

    /// Returns up to `top_k` candidates, best first. Never widens the filter.
    #[instrument(skip(self, query, constraint), fields(partition = %partition))]
    pub async fn retrieve(
        &self,
        query: &str,
        constraint: &PriceConstraint,
        partition: &str,
    ) -> Result<Vec<Candidate>, RetrievalError> {
        let vector = self.embed(query).await?;
        let filter =
            CatalogFilter::from_constraint(constraint).with_thresholds(self.config.thresholds);
        debug!(?filter, "Searching catalog");

        let candidates = self
            .search(vector, &filter, partition, self.config.top_k)
            .await?;

        info!(candidates = candidates.len(), filtered = !filter.is_empty(), "Retrieved candidates");
        Ok(candidates)
    }
}
