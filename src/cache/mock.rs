use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::RwLock;

use super::backend::CacheBackend;
use super::error::{CacheError, CacheResult};
use super::types::CacheEntry;

/// In-memory stand-in for a durable cache, with switchable failure and latency.
#[derive(Clone, Default)]
pub struct MockCacheBackend {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    failing: Arc<AtomicBool>,
    delay: Option<Duration>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MockCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every operation fails, as if the connection dropped.
    pub fn failing() -> Self {
        let backend = Self::default();
        backend.set_failing(true);
        backend
    }

    /// A backend that sleeps before answering (for timeout tests).
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Seeds a value directly, bypassing failure injection.
    pub fn insert(&self, key: &str, value: &str, ttl: Duration) {
        self.entries
            .write()
            .insert(key.to_string(), CacheEntry::new(key, value, ttl));
    }

    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).map(|e| e.value.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn simulate(&self, operation: &'static str) -> CacheResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CacheError::OperationFailed {
                operation,
                message: "connection reset by peer".to_string(),
            });
        }
        Ok(())
    }
}

impl CacheBackend for MockCacheBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.simulate("get").await?;

        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.simulate("set").await?;
        self.insert(key, value, ttl);
        Ok(())
    }
}
