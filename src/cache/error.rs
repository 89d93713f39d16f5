use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by a cache backend.
///
/// These never leave [`TextCache`](super::TextCache): every variant is
/// logged and treated as a miss (reads) or redirected to memory (writes).
pub enum CacheError {
    /// Could not connect to the durable backend.
    #[error("failed to connect to cache at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// A read or write was rejected by the backend.
    #[error("cache {operation} failed: {message}")]
    OperationFailed {
        /// `get` or `set`.
        operation: &'static str,
        /// Error message.
        message: String,
    },

    /// The backend did not answer within the configured timeout.
    #[error("cache {operation} timed out")]
    Timeout {
        /// `connect`, `get` or `set`.
        operation: &'static str,
    },
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
