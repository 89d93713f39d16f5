use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};

use super::prompt::{menu_pairing_prompt, pairing_prompt, tasting_note_prompt};
use super::text::{canned_pairing, is_substantive, menu_query, reference_query, template_note};
use super::types::{EnrichedResult, EnrichmentConfig, NoteSource, PairingSource};
use crate::arbiter::Selection;
use crate::cache::{TextCache, pairing_key, tasting_note_key};
use crate::constants::{AUXILIARY_TOP_K, MENU_PARTITION_SUFFIX};
use crate::embedding::EmbeddingService;
use crate::llm::{CompletionOptions, LanguageModel, Prompt};
use crate::retrieval::Retriever;
use crate::vectordb::{Candidate, CatalogFilter, CatalogIndex, CatalogItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoteStep {
    Existing,
    Cache,
    Reference,
    Generate,
}

/// Tasting-note resolution order; the template closes the chain.
const NOTE_CHAIN: [NoteStep; 4] = [
    NoteStep::Existing,
    NoteStep::Cache,
    NoteStep::Reference,
    NoteStep::Generate,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairingStep {
    Cache,
    Menu,
    Generate,
}

/// Pairing resolution order; canned text closes the chain.
const PAIRING_CHAIN: [PairingStep; 3] = [PairingStep::Cache, PairingStep::Menu, PairingStep::Generate];

/// Resolves descriptive text for selected wines.
///
/// Every step absorbs its own failures, so enrichment as a whole cannot fail.
pub struct Enricher<E, I, L> {
    retriever: Arc<Retriever<E, I>>,
    model: L,
    cache: TextCache,
    config: EnrichmentConfig,
}

impl<E, I, L> Enricher<E, I, L>
where
    E: EmbeddingService,
    I: CatalogIndex,
    L: LanguageModel,
{
    pub fn new(
        retriever: Arc<Retriever<E, I>>,
        model: L,
        cache: TextCache,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            retriever,
            model,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &TextCache {
        &self.cache
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Enriches every selected candidate concurrently. Output order follows
    /// the selection, not completion order.
    #[instrument(skip(self, selection), fields(items = selection.len(), partition = %partition))]
    pub async fn enrich(
        &self,
        selection: Selection,
        partition: &str,
        want_pairing: bool,
    ) -> Vec<EnrichedResult> {
        let results = join_all(
            selection
                .into_candidates()
                .into_iter()
                .map(|candidate| self.enrich_one(candidate, partition, want_pairing)),
        )
        .await;

        info!(items = results.len(), with_pairing = want_pairing, "Enrichment complete");
        results
    }

    async fn enrich_one(
        &self,
        candidate: Candidate,
        partition: &str,
        want_pairing: bool,
    ) -> EnrichedResult {
        let (tasting_note, note_source) = self.tasting_note(&candidate.item).await;

        let (pairing, pairing_source) = if want_pairing {
            let (text, source) = self.pairing(&candidate.item, partition, &tasting_note).await;
            (Some(text), Some(source))
        } else {
            (None, None)
        };

        EnrichedResult {
            candidate,
            tasting_note,
            note_source,
            pairing,
            pairing_source,
        }
    }

    /// Walks the note chain, caching anything newly looked up or generated.
    #[instrument(skip(self, item), fields(item = %item.id))]
    pub async fn tasting_note(&self, item: &CatalogItem) -> (String, NoteSource) {
        let key = tasting_note_key(&item.id);

        for step in NOTE_CHAIN {
            let (found, source) = match step {
                NoteStep::Existing => (
                    item.tasting_note
                        .as_deref()
                        .filter(|t| self.substantive(t))
                        .map(|t| t.trim().to_string()),
                    NoteSource::Existing,
                ),
                NoteStep::Cache => (
                    self.cache.get(&key).await.filter(|t| self.substantive(t)),
                    NoteSource::Cache,
                ),
                NoteStep::Reference => (self.reference_note(item).await, NoteSource::Reference),
                NoteStep::Generate => (
                    self.generate(&tasting_note_prompt(item), CompletionOptions::TASTING_NOTE)
                        .await,
                    NoteSource::Generated,
                ),
            };

            if let Some(text) = found {
                if matches!(step, NoteStep::Reference | NoteStep::Generate) {
                    self.cache.set(&key, &text).await;
                }
                debug!(source = ?source, "Tasting note resolved");
                return (text, source);
            }
            debug!(step = ?step, "Tasting note step missed");
        }

        (template_note(item), NoteSource::Template)
    }

    /// Walks the pairing chain. Only called when pairing was requested.
    #[instrument(skip(self, item, note), fields(item = %item.id))]
    pub async fn pairing(
        &self,
        item: &CatalogItem,
        partition: &str,
        note: &str,
    ) -> (String, PairingSource) {
        let key = pairing_key(partition, &item.id);

        for step in PAIRING_CHAIN {
            let (found, source) = match step {
                PairingStep::Cache => (
                    self.cache.get(&key).await.filter(|t| !t.trim().is_empty()),
                    PairingSource::Cache,
                ),
                PairingStep::Menu if !self.config.menu_pairing => continue,
                PairingStep::Menu => (self.menu_pairing(item, partition, note).await, PairingSource::Menu),
                PairingStep::Generate => (
                    self.generate(&pairing_prompt(item), CompletionOptions::PAIRING)
                        .await,
                    PairingSource::Generated,
                ),
            };

            if let Some(text) = found {
                if step != PairingStep::Cache {
                    self.cache.set(&key, &text).await;
                }
                return (text, source);
            }
        }

        (canned_pairing(item).to_string(), PairingSource::Canned)
    }

    /// Producer note from the reference partition, if one matches.
    async fn reference_note(&self, item: &CatalogItem) -> Option<String> {
        let producer = item.producer.trim().to_lowercase();
        if producer.is_empty() {
            return None;
        }

        let hits = self
            .auxiliary_search(&reference_query(item), &self.config.reference_partition)
            .await?;

        hits.into_iter()
            .filter(|hit| hit.item.producer.to_lowercase().contains(&producer))
            .find_map(|hit| hit.item.tasting_note.filter(|t| self.substantive(t)))
    }

    /// One dish from the restaurant's menu partition, chosen by the model.
    async fn menu_pairing(&self, item: &CatalogItem, partition: &str, note: &str) -> Option<String> {
        let menu_partition = format!("{partition}{MENU_PARTITION_SUFFIX}");
        let dishes = self
            .auxiliary_search(&menu_query(item, note), &menu_partition)
            .await?;
        if dishes.is_empty() {
            debug!(partition = %menu_partition, "No menu dishes found");
            return None;
        }

        self.generate(
            &menu_pairing_prompt(item, note, &dishes),
            CompletionOptions::MENU_PAIRING,
        )
        .await
    }

    /// Unfiltered top hits from `partition`; any failure reads as not found.
    async fn auxiliary_search(&self, query: &str, partition: &str) -> Option<Vec<Candidate>> {
        let vector = match self.retriever.embed(query).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, partition = %partition, "Auxiliary embedding failed");
                return None;
            }
        };

        match self
            .retriever
            .search(vector, &CatalogFilter::default(), partition, AUXILIARY_TOP_K)
            .await
        {
            Ok(hits) => Some(hits),
            Err(e) => {
                warn!(error = %e, partition = %partition, "Auxiliary search failed");
                None
            }
        }
    }

    /// Model text under the generation timeout; failures and thin replies
    /// read as nothing.
    async fn generate(&self, prompt: &Prompt, options: CompletionOptions) -> Option<String> {
        match tokio::time::timeout(self.config.llm_timeout, self.model.complete(prompt, options)).await {
            Ok(Ok(text)) => {
                let text = text.trim().to_string();
                if self.substantive(&text) {
                    Some(text)
                } else {
                    warn!(reply_len = text.len(), "Generated text too thin, discarding");
                    None
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Text generation failed");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.llm_timeout.as_millis() as u64,
                    "Text generation timed out"
                );
                None
            }
        }
    }

    #[inline]
    fn substantive(&self, text: &str) -> bool {
        is_substantive(text, self.config.min_note_len)
    }
}
