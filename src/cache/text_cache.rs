//! Durable-first cache with an in-process fallback.
//!
//! Reads try the durable backend and fall back to memory on any error or
//! timeout; writes that the durable backend rejects land in memory instead.
//! Nothing here returns an error to the caller.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::backend::{CacheBackend, DurableCache};
use super::memory::MemoryCache;
use crate::constants::{DEFAULT_CACHE_TIMEOUT, DEFAULT_CACHE_TTL};

#[derive(Clone)]
pub struct TextCache {
    durable: Option<DurableCache>,
    memory: MemoryCache,
    ttl: Duration,
    timeout: Duration,
}

impl TextCache {
    /// A cache with no durable backend.
    pub fn in_memory(capacity: u64, ttl: Duration) -> Self {
        Self {
            durable: None,
            memory: MemoryCache::with_capacity(capacity),
            ttl,
            timeout: DEFAULT_CACHE_TIMEOUT,
        }
    }

    /// A cache backed by `durable`, falling back to memory.
    pub fn with_durable(durable: DurableCache, capacity: u64, ttl: Duration) -> Self {
        Self {
            durable: Some(durable),
            ..Self::in_memory(capacity, ttl)
        }
    }

    /// Sets the per-operation timeout for the durable backend.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connects to `url` when given; any connection failure yields an
    /// in-memory cache and a warning, never an error.
    pub async fn connect(
        url: Option<&str>,
        capacity: u64,
        ttl: Duration,
        timeout: Duration,
    ) -> Self {
        let Some(url) = url else {
            info!("No durable cache configured, using in-process cache");
            return Self::in_memory(capacity, ttl).timeout(timeout);
        };

        match DurableCache::connect(url, timeout).await {
            Ok(durable) => {
                info!(backend = durable.kind(), "Durable cache connected");
                Self::with_durable(durable, capacity, ttl).timeout(timeout)
            }
            Err(e) => {
                warn!(error = %e, "Durable cache unavailable, using in-process cache");
                Self::in_memory(capacity, ttl).timeout(timeout)
            }
        }
    }

    pub fn is_durable(&self) -> bool {
        self.durable.is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn memory(&self) -> &MemoryCache {
        &self.memory
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn get(&self, key: &str) -> Option<String> {
        if let Some(durable) = &self.durable {
            match tokio::time::timeout(self.timeout, durable.get(key)).await {
                Ok(Ok(Some(value))) => return Some(value),
                Ok(Ok(None)) => {
                    debug!("Durable cache miss");
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "Durable cache read failed, checking memory");
                }
                Err(_) => {
                    warn!(timeout_ms = self.timeout.as_millis() as u64, "Durable cache read timed out, checking memory");
                }
            }
        }

        self.memory.lookup(key)
    }

    /// Stores `value` for the configured TTL.
    pub async fn set(&self, key: &str, value: &str) {
        self.set_with_ttl(key, value, self.ttl).await;
    }

    #[instrument(skip(self, value), fields(value_len = value.len()), level = "debug")]
    pub async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) {
        if let Some(durable) = &self.durable {
            match tokio::time::timeout(self.timeout, durable.set(key, value, ttl)).await {
                Ok(Ok(())) => return,
                Ok(Err(e)) => {
                    warn!(error = %e, "Durable cache write failed, storing in memory");
                }
                Err(_) => {
                    warn!("Durable cache write timed out, storing in memory");
                }
            }
        }

        self.memory.insert(key, value, ttl);
    }
}

impl Default for TextCache {
    fn default() -> Self {
        Self::in_memory(crate::constants::DEFAULT_MEMORY_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }
}

impl std::fmt::Debug for TextCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextCache")
            .field("durable", &self.durable)
            .field("memory", &self.memory)
            .field("ttl", &self.ttl)
            .finish()
    }
}
