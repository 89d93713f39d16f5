use serde::{Deserialize, Serialize};

/// Heuristic price parameters.
///
/// Defaults: ±30% around an approximate price, budget below 50, premium from
/// 100, luxury from 200.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceThresholds {
    /// Fractional band applied to "around N" (0.3 → `[0.7N, 1.3N]`).
    pub approx_tolerance: f64,
    /// Upper edge of the budget bucket.
    pub budget_ceiling: f64,
    /// Lower edge of the premium bucket.
    pub premium_floor: f64,
    /// Lower edge of the luxury bucket.
    pub luxury_floor: f64,
}

impl Default for PriceThresholds {
    fn default() -> Self {
        Self {
            approx_tolerance: 0.3,
            budget_ceiling: 50.0,
            premium_floor: 100.0,
            luxury_floor: 200.0,
        }
    }
}

/// Categorical price intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTag {
    /// "budget", "affordable", ... (implies upper ≈ budget ceiling).
    Budget,
    /// "premium", "luxury", ... (implies lower ≈ premium floor).
    Premium,
}

impl PriceTag {
    /// Index buckets this tag selects.
    pub fn buckets(&self) -> &'static [PriceBucket] {
        match self {
            PriceTag::Budget => &[PriceBucket::Budget],
            PriceTag::Premium => &[PriceBucket::Premium, PriceBucket::Luxury],
        }
    }
}

/// Coarse price bucket stored on every catalog payload (`price_range`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBucket {
    Budget,
    Mid,
    Premium,
    Luxury,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 4] = [
        PriceBucket::Budget,
        PriceBucket::Mid,
        PriceBucket::Premium,
        PriceBucket::Luxury,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBucket::Budget => "budget",
            PriceBucket::Mid => "mid",
            PriceBucket::Premium => "premium",
            PriceBucket::Luxury => "luxury",
        }
    }

    /// Dollar label written by older ingestion runs.
    #[inline]
    pub fn legacy_label(&self) -> &'static str {
        match self {
            PriceBucket::Budget => "<$50",
            PriceBucket::Mid => "$50-100",
            PriceBucket::Premium => "$100-200",
            PriceBucket::Luxury => "$200+",
        }
    }

    /// Buckets a concrete price.
    pub fn for_price(price: f64, thresholds: &PriceThresholds) -> Self {
        if price < thresholds.budget_ceiling {
            PriceBucket::Budget
        } else if price < thresholds.premium_floor {
            PriceBucket::Mid
        } else if price < thresholds.luxury_floor {
            PriceBucket::Premium
        } else {
            PriceBucket::Luxury
        }
    }

    /// Price interval covered by the bucket: inclusive lower, exclusive upper.
    pub fn price_bounds(&self, thresholds: &PriceThresholds) -> (Option<f64>, Option<f64>) {
        match self {
            PriceBucket::Budget => (None, Some(thresholds.budget_ceiling)),
            PriceBucket::Mid => (Some(thresholds.budget_ceiling), Some(thresholds.premium_floor)),
            PriceBucket::Premium => (Some(thresholds.premium_floor), Some(thresholds.luxury_floor)),
            PriceBucket::Luxury => (Some(thresholds.luxury_floor), None),
        }
    }

    /// Parses a stored bucket, accepting the legacy dollar labels
    /// (`<$50`, `$50-100`, `$100-200`, `$200+`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "budget" | "<$50" => Some(PriceBucket::Budget),
            "mid" | "$50-100" => Some(PriceBucket::Mid),
            "premium" | "$100-200" => Some(PriceBucket::Premium),
            "luxury" | "$200+" => Some(PriceBucket::Luxury),
            _ => None,
        }
    }

    /// Representative price for an item that only carries a bucket.
    pub fn estimated_price(&self, thresholds: &PriceThresholds) -> f64 {
        match self {
            PriceBucket::Budget => thresholds.budget_ceiling * 0.8,
            PriceBucket::Mid => (thresholds.budget_ceiling + thresholds.premium_floor) / 2.0,
            PriceBucket::Premium => (thresholds.premium_floor + thresholds.luxury_floor) / 2.0,
            PriceBucket::Luxury => thresholds.luxury_floor * 1.25,
        }
    }
}

impl std::fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price filter extracted from one request. Never persisted.
///
/// Invariant: when both bounds are present, `lower <= upper`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceConstraint {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub tags: Vec<PriceTag>,
}

impl PriceConstraint {
    /// No bounds and no tags: retrieval runs unfiltered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none() && self.tags.is_empty()
    }

    #[inline]
    pub fn has_bounds(&self) -> bool {
        self.lower.is_some() || self.upper.is_some()
    }

    /// Returns `true` if `price` satisfies the numeric bounds (tags ignored).
    pub fn admits(&self, price: f64) -> bool {
        self.lower.is_none_or(|lo| price >= lo) && self.upper.is_none_or(|hi| price <= hi)
    }

    /// Buckets implied by the tags, deduplicated and ordered.
    pub fn tag_buckets(&self) -> Vec<PriceBucket> {
        let mut buckets: Vec<PriceBucket> = self
            .tags
            .iter()
            .flat_map(|t| t.buckets().iter().copied())
            .collect();
        buckets.sort();
        buckets.dedup();
        buckets
    }
}

/// Output of the constraint parser.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub constraint: PriceConstraint,
    /// Text used for similarity search: the request, unmodified.
    pub query: String,
}
