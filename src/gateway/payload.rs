use serde::{Deserialize, Serialize};

use crate::arbiter::SelectionSource;
use crate::constraint::{PriceConstraint, PriceThresholds};
use crate::enrichment::{EnrichedResult, NoteSource, PairingSource};

/// Body of `POST /v1/recommend`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendRequest {
    pub query: String,
    pub partition: String,
    /// Omitted means "infer from the query's food vocabulary".
    #[serde(default)]
    pub include_pairing: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub id: String,
    pub created: i64,
    pub selection: SelectionSource,
    pub constraint: PriceConstraint,
    pub recommendations: Vec<WineRecommendation>,
}

/// One wine as shown to the guest.
#[derive(Debug, Clone, Serialize)]
pub struct WineRecommendation {
    pub id: String,
    pub score: f32,
    pub producer: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub region: String,
    pub country: String,
    pub grapes: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vintage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub tasting_note: String,
    pub tasting_note_source: NoteSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairing_source: Option<PairingSource>,
}

impl WineRecommendation {
    pub fn from_result(result: EnrichedResult, thresholds: &PriceThresholds) -> Self {
        let price = result.candidate.item.display_price(thresholds);
        let score = result.candidate.score;
        let item = result.candidate.item;
        Self {
            id: item.id,
            score,
            producer: item.producer,
            label: item.label,
            region: item.region,
            country: item.country,
            grapes: item.grapes,
            category: item.category,
            vintage: item.vintage,
            price,
            tasting_note: result.tasting_note,
            tasting_note_source: result.note_source,
            pairing: result.pairing,
            pairing_source: result.pairing_source,
        }
    }
}
