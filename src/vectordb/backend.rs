use super::client::{CatalogIndex, QdrantCatalog};
use super::error::CatalogError;
use super::filter::CatalogFilter;
use super::model::Candidate;

#[cfg(any(test, feature = "mock"))]
use super::mock::MockCatalog;

#[derive(Clone)]
/// Catalog backend wrapper (Qdrant or mock).
pub enum CatalogBackend {
    /// Qdrant-backed catalog.
    Qdrant(QdrantCatalog),
    #[cfg(any(test, feature = "mock"))]
    /// In-memory mock catalog.
    Mock(MockCatalog),
}

impl CatalogBackend {
    /// Creates a backend (`mock:` URLs require the `mock` feature).
    pub fn connect(url: &str, collection: &str) -> Result<Self, CatalogError> {
        if url.starts_with("mock:") {
            #[cfg(any(test, feature = "mock"))]
            {
                Ok(Self::Mock(MockCatalog::new()))
            }
            #[cfg(not(any(test, feature = "mock")))]
            {
                Err(CatalogError::ConnectionFailed {
                    url: url.to_string(),
                    message: "Mock backend not enabled. Compile with --features mock".to_string(),
                })
            }
        } else {
            Ok(Self::Qdrant(QdrantCatalog::new(url, collection)?))
        }
    }

    /// Probes the backend; the mock is always healthy.
    pub async fn health_check(&self) -> Result<(), CatalogError> {
        match self {
            CatalogBackend::Qdrant(c) => c.health_check().await,
            #[cfg(any(test, feature = "mock"))]
            CatalogBackend::Mock(_) => Ok(()),
        }
    }

    /// Creates the collection when missing; the mock needs no setup.
    pub async fn ensure_collection(&self, vector_size: u64) -> Result<(), CatalogError> {
        match self {
            CatalogBackend::Qdrant(c) => c.ensure_collection(vector_size).await,
            #[cfg(any(test, feature = "mock"))]
            CatalogBackend::Mock(_) => Ok(()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CatalogBackend::Qdrant(_) => "qdrant",
            #[cfg(any(test, feature = "mock"))]
            CatalogBackend::Mock(_) => "mock",
        }
    }
}

impl std::fmt::Debug for CatalogBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CatalogBackend").field(&self.kind()).finish()
    }
}

impl CatalogIndex for CatalogBackend {
    async fn query(
        &self,
        vector: Vec<f32>,
        filter: &CatalogFilter,
        partition: &str,
        top_k: u64,
    ) -> Result<Vec<Candidate>, CatalogError> {
        match self {
            CatalogBackend::Qdrant(c) => c.query(vector, filter, partition, top_k).await,
            #[cfg(any(test, feature = "mock"))]
            CatalogBackend::Mock(c) => c.query(vector, filter, partition, top_k).await,
        }
    }
}
