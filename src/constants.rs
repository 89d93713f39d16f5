//! Cross-cutting, shared defaults.
//!
//! Every value here is a default only; [`crate::config::Config`] lets the
//! deployment override it through `SOMMELIER_*` environment variables.

use std::time::Duration;

/// Embedding dimension requested from the embedding service.
pub const DEFAULT_EMBEDDING_DIM: usize = 1024;

/// Candidates requested from the catalog index per request.
pub const DEFAULT_TOP_K: u64 = 10;

/// Upper bound on candidates enumerated in the arbiter prompt.
pub const DEFAULT_ARBITER_MAX_CANDIDATES: usize = 10;

/// Number of items every recommendation aims to return.
pub const SELECTION_SIZE: usize = 2;

pub const DEFAULT_EMBEDDING_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_INDEX_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(2);

/// Lifetime of generated descriptive text in the cache (30 days).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Max entries held by the in-process cache.
pub const DEFAULT_MEMORY_CACHE_CAPACITY: u64 = 10_000;

/// Descriptive text at or below this many characters is not substantive.
pub const DEFAULT_MIN_NOTE_LEN: usize = 20;

/// Partition holding the broader producer reference catalog.
pub const DEFAULT_REFERENCE_PARTITION: &str = "producers";

/// Suffix appended to a partition tag to address its menu items.
pub const MENU_PARTITION_SUFFIX: &str = "_menu";

/// Hits requested from the reference and menu partitions.
pub const AUXILIARY_TOP_K: u64 = 3;

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// Called on every vector the embedding service returns: a short or empty
/// vector is rejected here instead of being sent to the index.
///
/// # Example
///
/// ```
/// use sommelier::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// validate_embedding_dim(1024, DEFAULT_EMBEDDING_DIM).unwrap();
/// assert!(validate_embedding_dim(0, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if actual == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_embedding_dim_match() {
        assert!(validate_embedding_dim(1024, 1024).is_ok());
    }

    #[test]
    fn test_validate_embedding_dim_zero() {
        assert_eq!(
            validate_embedding_dim(0, 1024),
            Err(DimValidationError::ZeroDimension)
        );
    }

    #[test]
    fn test_validate_embedding_dim_mismatch() {
        assert_eq!(
            validate_embedding_dim(768, 1024),
            Err(DimValidationError::DimensionMismatch {
                expected: 1024,
                actual: 768
            })
        );
    }

    #[test]
    fn test_cache_ttl_is_thirty_days() {
        assert_eq!(DEFAULT_CACHE_TTL.as_secs(), 2_592_000);
    }

    #[test]
    fn test_error_display() {
        let err = DimValidationError::ZeroDimension;
        assert_eq!(err.to_string(), "embedding dimension cannot be zero");

        let err = DimValidationError::DimensionMismatch {
            expected: 1024,
            actual: 768,
        };
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("768"));
    }
}
