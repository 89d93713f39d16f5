//! Catalog index: item model, price filters, Qdrant client.

pub mod backend;
pub mod client;
pub mod error;
pub mod filter;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use backend::CatalogBackend;
pub use client::{CatalogIndex, QdrantCatalog, catalog_points};
pub use error::CatalogError;
pub use filter::CatalogFilter;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCatalog, cosine_similarity};
pub use model::{Candidate, CatalogItem};
