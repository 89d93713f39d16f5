use std::time::Duration;

use serde::Serialize;

use crate::config::Config;
use crate::constants::{DEFAULT_LLM_TIMEOUT, DEFAULT_MIN_NOTE_LEN, DEFAULT_REFERENCE_PARTITION};
use crate::constraint::PriceThresholds;
use crate::vectordb::Candidate;

/// Where a tasting note came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSource {
    Existing,
    Cache,
    Reference,
    Generated,
    Template,
}

/// Where a pairing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingSource {
    Cache,
    Menu,
    Generated,
    Canned,
}

/// A selected candidate with its resolved descriptive text.
///
/// `tasting_note` is never empty. `pairing` is `None` exactly when pairing
/// was not requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedResult {
    pub candidate: Candidate,
    pub tasting_note: String,
    pub note_source: NoteSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairing_source: Option<PairingSource>,
}

impl EnrichedResult {
    #[inline]
    pub fn id(&self) -> &str {
        self.candidate.id()
    }
}

#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Partition searched for producer reference notes.
    pub reference_partition: String,
    /// Try the restaurant's menu before generic pairings.
    pub menu_pairing: bool,
    pub min_note_len: usize,
    pub llm_timeout: Duration,
    pub thresholds: PriceThresholds,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            reference_partition: DEFAULT_REFERENCE_PARTITION.to_string(),
            menu_pairing: false,
            min_note_len: DEFAULT_MIN_NOTE_LEN,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
            thresholds: PriceThresholds::default(),
        }
    }
}

impl EnrichmentConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            reference_partition: config.reference_partition.clone(),
            menu_pairing: config.menu_pairing,
            min_note_len: config.min_note_len,
            llm_timeout: config.llm_timeout,
            thresholds: config.price,
        }
    }
}
