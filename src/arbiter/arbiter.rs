use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::parse::parse_selection;
use super::prompt::selection_prompt;
use super::types::{Selection, SelectionSource};
use crate::constants::{DEFAULT_ARBITER_MAX_CANDIDATES, DEFAULT_LLM_TIMEOUT, SELECTION_SIZE};
use crate::constraint::PriceThresholds;
use crate::llm::{CompletionOptions, LanguageModel};
use crate::vectordb::Candidate;

/// Picks two candidates with the language model, or the top two by score.
///
/// Never fails: every model problem ends in the deterministic fallback.
pub struct SelectionArbiter<L> {
    model: L,
    max_candidates: usize,
    timeout: Duration,
    thresholds: PriceThresholds,
}

impl<L: LanguageModel> SelectionArbiter<L> {
    pub fn new(model: L) -> Self {
        Self {
            model,
            max_candidates: DEFAULT_ARBITER_MAX_CANDIDATES,
            timeout: DEFAULT_LLM_TIMEOUT,
            thresholds: PriceThresholds::default(),
        }
    }

    /// Caps how many candidates are enumerated in the prompt (at least two).
    pub fn max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max.max(SELECTION_SIZE);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn thresholds(mut self, thresholds: PriceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn model(&self) -> &L {
        &self.model
    }

    #[instrument(skip(self, query, candidates), fields(candidates = candidates.len()))]
    pub async fn select(&self, query: &str, candidates: Vec<Candidate>) -> Selection {
        match candidates.len() {
            0 => {
                debug!("No candidates to arbitrate");
                Selection::empty()
            }
            1 => {
                debug!("Single candidate, skipping arbitration");
                Selection {
                    candidates,
                    source: SelectionSource::Insufficient,
                }
            }
            _ => self.arbitrate(query, candidates).await,
        }
    }

    async fn arbitrate(&self, query: &str, candidates: Vec<Candidate>) -> Selection {
        let shown = candidates.len().min(self.max_candidates);
        let prompt = selection_prompt(query, &candidates[..shown], &self.thresholds);

        let reply = tokio::time::timeout(
            self.timeout,
            self.model.complete(&prompt, CompletionOptions::SELECTION),
        )
        .await;

        let picked = match reply {
            Ok(Ok(text)) => {
                let parsed = parse_selection(&text, shown);
                if parsed.is_none() {
                    warn!(reply = %text, "Unusable selection reply, using top two");
                }
                parsed
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Selection model failed, using top two");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Selection model timed out, using top two"
                );
                None
            }
        };

        if let Some((a, b)) = picked
            && candidates[a].id() != candidates[b].id()
        {
            info!(first = a + 1, second = b + 1, "Model selection accepted");
            let chosen = vec![candidates[a].clone(), candidates[b].clone()];
            return Selection {
                candidates: chosen,
                source: SelectionSource::Arbitrated,
            };
        }

        fallback_top_two(candidates)
    }
}

/// Two highest-scored candidates with distinct ids; ties keep retrieval order.
pub fn fallback_top_two(mut candidates: Vec<Candidate>) -> Selection {
    // sort_by is stable.
    candidates.sort_by(|a, b| rank_score(b.score).total_cmp(&rank_score(a.score)));

    let mut chosen: Vec<Candidate> = Vec::with_capacity(SELECTION_SIZE);
    for candidate in candidates {
        if chosen.len() == SELECTION_SIZE {
            break;
        }
        if chosen.iter().all(|c| c.id() != candidate.id()) {
            chosen.push(candidate);
        }
    }

    let source = if chosen.len() < SELECTION_SIZE {
        SelectionSource::Insufficient
    } else {
        SelectionSource::FallbackTopTwo
    };
    Selection {
        candidates: chosen,
        source,
    }
}

/// NaN scores rank below every real score.
fn rank_score(score: f32) -> f32 {
    if score.is_nan() { f32::NEG_INFINITY } else { score }
}
