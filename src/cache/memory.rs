//! In-process cache used when no durable backend is reachable.
//!
//! Entries carry their own expiry; an expired entry is evicted lazily by the
//! read that discovers it. Capacity is bounded by moka's LRU policy.

use std::time::Duration;

use moka::sync::Cache;

use super::backend::CacheBackend;
use super::error::CacheResult;
use super::types::CacheEntry;
use crate::constants::DEFAULT_MEMORY_CACHE_CAPACITY;

/// Bounded in-memory map of [`CacheEntry`] values. Cheap to clone (shared).
#[derive(Clone)]
pub struct MemoryCache {
    entries: Cache<String, CacheEntry>,
}

impl MemoryCache {
    /// Creates a cache with the default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CACHE_CAPACITY)
    }

    /// Creates a cache with a max entry capacity (LRU eviction).
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Returns the live value for `key`, evicting it if it has expired.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            self.entries.invalidate(key);
            return None;
        }
        Some(entry.value)
    }

    /// Inserts or overwrites `key`.
    pub fn insert(&self, key: &str, value: &str, ttl: Duration) {
        self.entries
            .insert(key.to_string(), CacheEntry::new(key, value, ttl));
    }

    /// Removes `key`.
    #[inline]
    pub fn remove(&self, key: &str) {
        self.entries.invalidate(key);
    }

    /// Returns `true` if a live (unexpired) entry exists for `key`.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the number of stored entries (expired ones included until read).
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entries.
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.lookup(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.insert(key, value, ttl);
        Ok(())
    }
}
