use std::future::Future;
use std::time::Duration;

use super::error::CacheResult;
use super::redis_cache::RedisCache;

#[cfg(any(test, feature = "mock"))]
use super::mock::MockCacheBackend;

/// Minimal key/value contract every cache backend implements.
pub trait CacheBackend: Send + Sync {
    /// Returns the stored value, or `None` on a miss or after expiry.
    fn get(&self, key: &str) -> impl Future<Output = CacheResult<Option<String>>> + Send;

    /// Stores `value` under `key` for `ttl` (last writer wins).
    fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl Future<Output = CacheResult<()>> + Send;
}

#[derive(Clone)]
/// Durable backend wrapper (Redis or mock).
pub enum DurableCache {
    /// Redis-backed cache.
    Redis(RedisCache),
    #[cfg(any(test, feature = "mock"))]
    /// In-memory mock backend with failure injection.
    Mock(MockCacheBackend),
}

impl DurableCache {
    /// Connects a durable backend (`mock:` URLs require the `mock` feature).
    pub async fn connect(url: &str, timeout: Duration) -> CacheResult<Self> {
        if url.starts_with("mock:") {
            #[cfg(any(test, feature = "mock"))]
            {
                Ok(Self::Mock(MockCacheBackend::new()))
            }
            #[cfg(not(any(test, feature = "mock")))]
            {
                Err(super::CacheError::ConnectionFailed {
                    url: url.to_string(),
                    message: "Mock backend not enabled. Compile with --features mock".to_string(),
                })
            }
        } else {
            Ok(Self::Redis(RedisCache::connect(url, timeout).await?))
        }
    }

    /// Short backend name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DurableCache::Redis(_) => "redis",
            #[cfg(any(test, feature = "mock"))]
            DurableCache::Mock(_) => "mock",
        }
    }
}

impl std::fmt::Debug for DurableCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DurableCache").field(&self.kind()).finish()
    }
}

impl CacheBackend for DurableCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        match self {
            DurableCache::Redis(c) => c.get(key).await,
            #[cfg(any(test, feature = "mock"))]
            DurableCache::Mock(c) => c.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        match self {
            DurableCache::Redis(c) => c.set(key, value, ttl).await,
            #[cfg(any(test, feature = "mock"))]
            DurableCache::Mock(c) => c.set(key, value, ttl).await,
        }
    }
}
