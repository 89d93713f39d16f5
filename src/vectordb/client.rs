use std::future::Future;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use tracing::{debug, instrument};

use super::error::CatalogError;
use super::filter::CatalogFilter;
use super::model::{Candidate, CatalogItem};
use crate::hashing::catalog_point_id;

/// Filtered similarity search over a partitioned catalog.
pub trait CatalogIndex: Send + Sync {
    /// Returns at most `top_k` hits from `partition`, best first.
    fn query(
        &self,
        vector: Vec<f32>,
        filter: &CatalogFilter,
        partition: &str,
        top_k: u64,
    ) -> impl Future<Output = Result<Vec<Candidate>, CatalogError>> + Send;
}

/// Builds upsert points keyed by partition and item id, so re-ingesting an
/// item overwrites it.
pub fn catalog_points(items: Vec<(CatalogItem, Vec<f32>)>) -> Vec<PointStruct> {
    items
        .into_iter()
        .map(|(item, vector)| {
            let id = catalog_point_id(&item.partition, &item.id);
            PointStruct::new(id, vector, item.to_payload())
        })
        .collect()
}

#[derive(Clone)]
/// Qdrant-backed catalog.
pub struct QdrantCatalog {
    client: Qdrant,
    url: String,
    collection: String,
}

impl QdrantCatalog {
    /// Creates a client for `url` operating on `collection`.
    pub fn new(url: &str, collection: &str) -> Result<Self, CatalogError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| CatalogError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), CatalogError> {
        self.client
            .health_check()
            .await
            .map_err(|e| CatalogError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Creates the collection with cosine distance if it does not exist.
    pub async fn ensure_collection(&self, vector_size: u64) -> Result<(), CatalogError> {
        let create_err = |e: qdrant_client::QdrantError| CatalogError::CreateCollectionFailed {
            collection: self.collection.clone(),
            message: e.to_string(),
        };

        if self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(create_err)?
        {
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(vector_size, Distance::Cosine)),
            )
            .await
            .map_err(create_err)?;
        Ok(())
    }

    /// Writes items with their vectors; ids are derived from partition and item id.
    pub async fn upsert_items(&self, items: Vec<(CatalogItem, Vec<f32>)>) -> Result<(), CatalogError> {
        if items.is_empty() {
            return Ok(());
        }

        let points = catalog_points(items);

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| CatalogError::UpsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    #[instrument(skip(self, vector, filter), fields(collection = %self.collection))]
    pub async fn query(
        &self,
        vector: Vec<f32>,
        filter: &CatalogFilter,
        partition: &str,
        top_k: u64,
    ) -> Result<Vec<Candidate>, CatalogError> {
        let search = SearchPointsBuilder::new(&self.collection, vector, top_k)
            .filter(filter.to_qdrant(partition))
            .with_payload(true);

        let response = self
            .client
            .search_points(search)
            .await
            .map_err(|e| CatalogError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let candidates: Vec<Candidate> = response
            .result
            .into_iter()
            .filter_map(Candidate::from_scored_point)
            .collect();

        debug!(hits = candidates.len(), "Catalog search complete");
        Ok(candidates)
    }
}

impl CatalogIndex for QdrantCatalog {
    async fn query(
        &self,
        vector: Vec<f32>,
        filter: &CatalogFilter,
        partition: &str,
        top_k: u64,
    ) -> Result<Vec<Candidate>, CatalogError> {
        QdrantCatalog::query(self, vector, filter, partition, top_k).await
    }
}
