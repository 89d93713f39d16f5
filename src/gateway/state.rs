use std::sync::Arc;

use crate::constraint::PriceThresholds;
use crate::pipeline::Recommender;

pub struct HandlerState<E, I, L> {
    pub recommender: Arc<Recommender<E, I, L>>,

    /// Used to estimate display prices for items without an exact price.
    pub thresholds: PriceThresholds,
}

impl<E, I, L> HandlerState<E, I, L> {
    pub fn new(recommender: Arc<Recommender<E, I, L>>, thresholds: PriceThresholds) -> Self {
        Self {
            recommender,
            thresholds,
        }
    }
}

impl<E, I, L> Clone for HandlerState<E, I, L> {
    fn clone(&self) -> Self {
        Self {
            recommender: Arc::clone(&self.recommender),
            thresholds: self.thresholds,
        }
    }
}
