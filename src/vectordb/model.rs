use std::collections::HashMap;

use qdrant_client::Payload;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{ScoredPoint, Value};
use serde::{Deserialize, Serialize};

use crate::constraint::{PriceBucket, PriceThresholds};

/// One entry in a partition of the catalog. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub partition: String,
    pub producer: String,
    /// Cuvée or label name; may be empty.
    pub label: String,
    pub region: String,
    pub country: String,
    /// Free-form grape list as listed ("Cabernet Sauvignon, Merlot").
    pub grapes: String,
    /// Category tag such as "red", "white", "sparkling".
    pub category: String,
    pub vintage: Option<String>,
    pub price: Option<f64>,
    pub price_range: Option<PriceBucket>,
    /// Semantic text the item was embedded from.
    pub blurb: String,
    pub tasting_note: Option<String>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, partition: impl Into<String>, producer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            partition: partition.into(),
            producer: producer.into(),
            label: String::new(),
            region: String::new(),
            country: String::new(),
            grapes: String::new(),
            category: String::new(),
            vintage: None,
            price: None,
            price_range: None,
            blurb: String::new(),
            tasting_note: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>, country: impl Into<String>) -> Self {
        self.region = region.into();
        self.country = country.into();
        self
    }

    pub fn with_grapes(mut self, grapes: impl Into<String>) -> Self {
        self.grapes = grapes.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_vintage(mut self, vintage: impl Into<String>) -> Self {
        self.vintage = Some(vintage.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_price_range(mut self, bucket: PriceBucket) -> Self {
        self.price_range = Some(bucket);
        self
    }

    pub fn with_blurb(mut self, blurb: impl Into<String>) -> Self {
        self.blurb = blurb.into();
        self
    }

    pub fn with_tasting_note(mut self, note: impl Into<String>) -> Self {
        self.tasting_note = Some(note.into());
        self
    }

    /// Exact price, else an estimate from the bucket.
    pub fn display_price(&self, thresholds: &PriceThresholds) -> Option<f64> {
        self.price
            .or_else(|| self.price_range.map(|b| b.estimated_price(thresholds)))
    }

    /// Producer and label for prompts and logs.
    pub fn title(&self) -> String {
        if self.label.is_empty() {
            self.producer.clone()
        } else {
            format!("{} {}", self.producer, self.label)
        }
    }

    /// Stored bucket, else the bucket of the exact price.
    pub fn bucket(&self, thresholds: &PriceThresholds) -> Option<PriceBucket> {
        self.price_range
            .or_else(|| self.price.map(|p| PriceBucket::for_price(p, thresholds)))
    }

    /// Payload stored with the point; field names match existing ingestion.
    /// Priced items always carry a `price_range` bucket.
    pub fn to_payload(&self) -> Payload {
        self.to_payload_with(&PriceThresholds::default())
    }

    pub fn to_payload_with(&self, thresholds: &PriceThresholds) -> Payload {
        let mut payload = Payload::new();
        payload.insert("item_id", self.id.clone());
        payload.insert("partition", self.partition.clone());
        payload.insert("producer", self.producer.clone());
        payload.insert("label", self.label.clone());
        payload.insert("region", self.region.clone());
        payload.insert("country", self.country.clone());
        payload.insert("grapes", self.grapes.clone());
        payload.insert("wine_type", self.category.clone());
        payload.insert("text", self.blurb.clone());
        if let Some(vintage) = &self.vintage {
            payload.insert("vintage", vintage.clone());
        }
        if let Some(price) = self.price {
            payload.insert("price", price);
        }
        if let Some(bucket) = self.bucket(thresholds) {
            payload.insert("price_range", bucket.as_str().to_string());
        }
        if let Some(note) = &self.tasting_note {
            payload.insert("tasting_note", note.clone());
        }
        payload
    }

    /// Rebuilds an item from a stored payload. `fallback_id` is used when the
    /// payload predates the `item_id` field.
    pub fn from_payload(payload: &HashMap<String, Value>, fallback_id: String) -> Self {
        let text = |keys: &[&str]| -> Option<String> {
            keys.iter()
                .find_map(|k| payload_string(payload, k))
                .filter(|s| !s.is_empty())
        };

        let price = payload_number(payload, "price");
        let price_range = text(&["price_range"])
            .and_then(|s| PriceBucket::parse(&s))
            .or_else(|| price.map(|p| PriceBucket::for_price(p, &PriceThresholds::default())));

        Self {
            id: text(&["item_id"]).unwrap_or(fallback_id),
            partition: text(&["partition", "restaurant"]).unwrap_or_default(),
            producer: text(&["producer"]).unwrap_or_default(),
            label: text(&["label", "wine_name", "name"]).unwrap_or_default(),
            region: text(&["region"]).unwrap_or_default(),
            country: text(&["country"]).unwrap_or_default(),
            grapes: text(&["grapes"]).unwrap_or_default(),
            category: text(&["wine_type", "category"]).unwrap_or_default(),
            vintage: text(&["vintage"]),
            price,
            price_range,
            blurb: text(&["text", "blurb", "description"]).unwrap_or_default(),
            tasting_note: text(&["tasting_note", "tasting_keywords"]),
        }
    }
}

/// A catalog hit with its similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub score: f32,
    pub item: CatalogItem,
}

impl Candidate {
    pub fn new(score: f32, item: CatalogItem) -> Self {
        Self { score, item }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let fallback_id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n.to_string(),
            Some(PointIdOptions::Uuid(s)) => s,
            None => return None,
        };

        Some(Self {
            score: point.score,
            item: CatalogItem::from_payload(&point.payload, fallback_id),
        })
    }
}

fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    match &payload.get(key)?.kind {
        Some(Kind::StringValue(s)) => Some(s.trim().to_string()),
        Some(Kind::IntegerValue(n)) => Some(n.to_string()),
        Some(Kind::ListValue(list)) => {
            let parts: Vec<&str> = list
                .values
                .iter()
                .filter_map(|v| match &v.kind {
                    Some(Kind::StringValue(s)) => Some(s.as_str()),
                    _ => None,
                })
                .collect();
            Some(parts.join(", "))
        }
        _ => None,
    }
}

fn payload_number(payload: &HashMap<String, Value>, key: &str) -> Option<f64> {
    match &payload.get(key)?.kind {
        Some(Kind::DoubleValue(n)) => Some(*n),
        Some(Kind::IntegerValue(n)) => Some(*n as f64),
        Some(Kind::StringValue(s)) => s.trim().trim_start_matches('$').parse().ok(),
        _ => None,
    }
}
