//! Enrichment: tasting notes and, when asked for, food pairings.
//!
//! Tasting notes resolve through existing text, the cache, the producer
//! reference partition, and generation, ending in a template built from the
//! item's attributes. Pairings are never computed unless requested.

mod engine;
pub mod prompt;
pub mod text;
mod types;


pub use engine::Enricher;
pub use text::{PLACEHOLDER_PHRASES, canned_pairing, is_substantive, template_note};
pub use types::{EnrichedResult, EnrichmentConfig, NoteSource, PairingSource};
