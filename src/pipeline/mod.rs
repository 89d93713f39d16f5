//! End-to-end recommendation: parse, retrieve, arbitrate, enrich.

mod error;


pub use error::{FRIENDLY_MESSAGE, RecommendError};

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, instrument};

use crate::arbiter::{SelectionArbiter, SelectionSource};
use crate::cache::TextCache;
use crate::config::Config;
use crate::constants::{DEFAULT_ARBITER_MAX_CANDIDATES, DEFAULT_LLM_TIMEOUT};
use crate::constraint::{ConstraintParser, PriceConstraint, PriceThresholds};
use crate::embedding::EmbeddingService;
use crate::enrichment::{EnrichedResult, Enricher, EnrichmentConfig};
use crate::hashing::short_digest;
use crate::llm::LanguageModel;
use crate::retrieval::{Retriever, RetrieverConfig};
use crate::vectordb::CatalogIndex;

/// Tunables for every stage of [`Recommender`].
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    pub thresholds: PriceThresholds,
    pub retrieval: RetrieverConfig,
    pub arbiter_max_candidates: usize,
    pub llm_timeout: Duration,
    pub enrichment: EnrichmentConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            thresholds: PriceThresholds::default(),
            retrieval: RetrieverConfig::default(),
            arbiter_max_candidates: DEFAULT_ARBITER_MAX_CANDIDATES,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl RecommenderConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            thresholds: config.price,
            retrieval: RetrieverConfig {
                top_k: config.top_k,
                embedding_timeout: config.embedding_timeout,
                index_timeout: config.index_timeout,
                thresholds: config.price,
            },
            arbiter_max_candidates: config.arbiter_max_candidates,
            llm_timeout: config.llm_timeout,
            enrichment: EnrichmentConfig::from_config(config),
        }
    }
}

/// Full outcome of one request.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub constraint: PriceConstraint,
    pub selection: SelectionSource,
    pub results: Vec<EnrichedResult>,
}

pub struct Recommender<E, I, L> {
    parser: ConstraintParser,
    retriever: Arc<Retriever<E, I>>,
    arbiter: SelectionArbiter<Arc<L>>,
    enricher: Enricher<E, I, Arc<L>>,
}

impl<E, I, L> Recommender<E, I, L>
where
    E: EmbeddingService,
    I: CatalogIndex,
    L: LanguageModel,
{
    pub fn new(embedder: E, index: I, model: L, cache: TextCache, config: RecommenderConfig) -> Self {
        let model = Arc::new(model);
        let retrieval = RetrieverConfig {
            thresholds: config.thresholds,
            ..config.retrieval
        };
        let retriever = Arc::new(Retriever::new(embedder, index, retrieval));
        let arbiter = SelectionArbiter::new(Arc::clone(&model))
            .max_candidates(config.arbiter_max_candidates)
            .timeout(config.llm_timeout)
            .thresholds(config.thresholds);
        let enricher = Enricher::new(Arc::clone(&retriever), model, cache, config.enrichment);

        Self {
            parser: ConstraintParser::new(config.thresholds),
            retriever,
            arbiter,
            enricher,
        }
    }

    pub fn retriever(&self) -> &Retriever<E, I> {
        &self.retriever
    }

    pub fn enricher(&self) -> &Enricher<E, I, Arc<L>> {
        &self.enricher
    }

    /// Up to two enriched wines for `request_text` from `partition`.
    pub async fn recommend(
        &self,
        request_text: &str,
        partition: &str,
        want_pairing: bool,
    ) -> Result<Vec<EnrichedResult>, RecommendError> {
        self.run(request_text, partition, want_pairing)
            .await
            .map(|r| r.results)
    }

    /// Like [`Self::recommend`], also reporting the constraint and how the
    /// selection was made.
    #[instrument(
        skip(self, request_text),
        fields(request = %short_digest(request_text), partition = %partition, pairing = want_pairing)
    )]
    pub async fn run(
        &self,
        request_text: &str,
        partition: &str,
        want_pairing: bool,
    ) -> Result<Recommendation, RecommendError> {
        let request_text = request_text.trim();
        if request_text.is_empty() {
            return Err(RecommendError::EmptyRequest);
        }
        let partition = partition.trim();
        if partition.is_empty() {
            return Err(RecommendError::EmptyPartition);
        }

        let parsed = self.parser.parse(request_text);

        let candidates = match self
            .retriever
            .retrieve(&parsed.query, &parsed.constraint, partition)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(error = %e, "Retrieval failed");
                return Err(e.into());
            }
        };

        let selection = self.arbiter.select(&parsed.query, candidates).await;
        let source = selection.source;
        let results = self.enricher.enrich(selection, partition, want_pairing).await;

        info!(
            selection = %source,
            results = results.len(),
            "Recommendation ready"
        );

        Ok(Recommendation {
            constraint: parsed.constraint,
            selection: source,
            results,
        })
    }
}
