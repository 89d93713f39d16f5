use qdrant_client::qdrant::{Condition, Filter, Range};

use super::model::CatalogItem;
use crate::constraint::{PriceBucket, PriceConstraint, PriceThresholds};

/// Index-native form of a [`PriceConstraint`].
///
/// Numeric bounds become a range over `price`. Buckets are only populated
/// when the constraint has no numeric bound; an item is in a bucket when its
/// stored `price_range` says so or its `price` falls inside the bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub buckets: Vec<PriceBucket>,
    /// Bucket edges used to translate buckets into price ranges.
    pub thresholds: PriceThresholds,
}

impl CatalogFilter {
    pub fn from_constraint(constraint: &PriceConstraint) -> Self {
        if constraint.has_bounds() {
            Self {
                lower: constraint.lower,
                upper: constraint.upper,
                ..Self::default()
            }
        } else {
            Self {
                buckets: constraint.tag_buckets(),
                ..Self::default()
            }
        }
    }

    pub fn with_thresholds(mut self, thresholds: PriceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// No price predicate at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none() && self.buckets.is_empty()
    }

    /// Bucket values to match, stable names and legacy labels together.
    pub fn bucket_keywords(&self) -> Vec<String> {
        self.buckets
            .iter()
            .flat_map(|b| [b.as_str().to_string(), b.legacy_label().to_string()])
            .collect()
    }

    /// Builds the Qdrant filter, always scoped to `partition`.
    pub fn to_qdrant(&self, partition: &str) -> Filter {
        let mut conditions = vec![Condition::matches("partition", partition.to_string())];

        if self.lower.is_some() || self.upper.is_some() {
            conditions.push(Condition::range(
                "price",
                Range {
                    gte: self.lower,
                    lte: self.upper,
                    ..Default::default()
                },
            ));
        }

        if !self.buckets.is_empty() {
            let mut any_bucket = vec![Condition::matches("price_range", self.bucket_keywords())];
            any_bucket.extend(self.buckets.iter().map(|bucket| {
                let (gte, lt) = bucket.price_bounds(&self.thresholds);
                Condition::range(
                    "price",
                    Range {
                        gte,
                        lt,
                        ..Default::default()
                    },
                )
            }));
            conditions.push(Filter::should(any_bucket).into());
        }

        Filter::must(conditions)
    }

    /// Evaluates the price predicate against an item (missing fields fail).
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if self.lower.is_some() || self.upper.is_some() {
            let Some(price) = item.price else {
                return false;
            };
            if self.lower.is_some_and(|lo| price < lo) || self.upper.is_some_and(|hi| price > hi) {
                return false;
            }
        }

        if !self.buckets.is_empty() {
            return self.buckets.iter().any(|bucket| self.in_bucket(item, *bucket));
        }

        true
    }

    fn in_bucket(&self, item: &CatalogItem, bucket: PriceBucket) -> bool {
        if item.price_range == Some(bucket) {
            return true;
        }
        let Some(price) = item.price else {
            return false;
        };
        let (lower, upper) = bucket.price_bounds(&self.thresholds);
        lower.is_none_or(|lo| price >= lo) && upper.is_none_or(|hi| price < hi)
    }
}
