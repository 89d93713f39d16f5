//! Descriptive-text cache: durable backend (Redis) with in-process fallback.

pub mod backend;
pub mod error;
pub mod memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod redis_cache;
pub mod text_cache;
pub mod types;

#[cfg(test)]
mod tests;

pub use backend::{CacheBackend, DurableCache};
pub use error::{CacheError, CacheResult};
pub use memory::MemoryCache;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCacheBackend;
pub use redis_cache::RedisCache;
pub use text_cache::TextCache;
pub use types::{CacheEntry, TextKind, pairing_key, tasting_note_key};
