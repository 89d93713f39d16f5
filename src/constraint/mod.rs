//! Request parsing: price constraints and pairing intent.

pub mod intent;
pub mod parser;
pub mod types;

#[cfg(test)]
mod tests;

pub use intent::{FOOD_KEYWORDS, wants_pairing};
pub use parser::{ConstraintParser, parse_request};
pub use types::{ParsedRequest, PriceBucket, PriceConstraint, PriceTag, PriceThresholds};
