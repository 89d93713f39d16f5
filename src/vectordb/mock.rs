use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::client::CatalogIndex;
use super::error::CatalogError;
use super::filter::CatalogFilter;
use super::model::{Candidate, CatalogItem};

#[derive(Clone)]
struct MockEntry {
    item: CatalogItem,
    vector: Vec<f32>,
    /// Overrides cosine scoring when set.
    pinned_score: Option<f32>,
}

/// In-memory catalog with brute-force cosine search.
///
/// Results keep insertion order among equal scores, like a stable index.
#[derive(Clone, Default)]
pub struct MockCatalog {
    entries: Arc<RwLock<Vec<MockEntry>>>,
    failing: Arc<AtomicBool>,
    queries: Arc<AtomicUsize>,
    /// Every query's partition and filter, oldest first.
    history: Arc<RwLock<Vec<(String, CatalogFilter)>>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let catalog = Self::default();
        catalog.set_failing(true);
        catalog
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Adds (or replaces, by partition and id) an item with its vector.
    pub fn insert(&self, item: CatalogItem, vector: Vec<f32>) {
        self.upsert(MockEntry {
            item,
            vector,
            pinned_score: None,
        });
    }

    /// Adds an item that scores `score` for every query.
    pub fn insert_with_score(&self, item: CatalogItem, score: f32) {
        self.upsert(MockEntry {
            item,
            vector: Vec::new(),
            pinned_score: Some(score),
        });
    }

    fn upsert(&self, entry: MockEntry) {
        let mut entries = self.entries.write();
        match entries
            .iter_mut()
            .find(|e| e.item.partition == entry.item.partition && e.item.id == entry.item.id)
        {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Filter passed to the most recent query.
    pub fn last_filter(&self) -> Option<CatalogFilter> {
        self.history.read().last().map(|(_, filter)| filter.clone())
    }

    /// Filters passed to queries against `partition`, oldest first.
    pub fn filters_for(&self, partition: &str) -> Vec<CatalogFilter> {
        self.history
            .read()
            .iter()
            .filter(|(p, _)| p == partition)
            .map(|(_, filter)| filter.clone())
            .collect()
    }

    pub fn search(
        &self,
        vector: &[f32],
        filter: &CatalogFilter,
        partition: &str,
        top_k: u64,
    ) -> Result<Vec<Candidate>, CatalogError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.history
            .write()
            .push((partition.to_string(), filter.clone()));

        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::SearchFailed {
                collection: "mock".to_string(),
                message: "index unavailable".to_string(),
            });
        }

        let entries = self.entries.read();
        let mut hits: Vec<Candidate> = entries
            .iter()
            .filter(|e| e.item.partition == partition && filter.matches(&e.item))
            .map(|e| {
                let score = e
                    .pinned_score
                    .unwrap_or_else(|| cosine_similarity(vector, &e.vector));
                Candidate::new(score, e.item.clone())
            })
            .collect();

        // sort_by is stable: equal scores keep insertion order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k as usize);
        Ok(hits)
    }
}

impl CatalogIndex for MockCatalog {
    async fn query(
        &self,
        vector: Vec<f32>,
        filter: &CatalogFilter,
        partition: &str,
        top_k: u64,
    ) -> Result<Vec<Candidate>, CatalogError> {
        self.search(&vector, filter, partition, top_k)
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
