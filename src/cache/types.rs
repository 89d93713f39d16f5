use std::time::{Duration, Instant};

/// Kind of descriptive text stored for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    TastingNote,
    Pairing,
}

impl TextKind {
    #[inline]
    pub fn prefix(&self) -> &'static str {
        match self {
            TextKind::TastingNote => "tasting-note",
            TextKind::Pairing => "pairing",
        }
    }
}

impl std::fmt::Display for TextKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Cache key for an item's tasting note: `tasting-note:<item-id>`.
///
/// Keys depend on item identity only, never on the request, so two requests
/// that land on the same wine share the entry.
#[inline]
pub fn tasting_note_key(item_id: &str) -> String {
    format!("{}:{}", TextKind::TastingNote.prefix(), item_id)
}

/// Cache key for an item's pairing text: `pairing:<partition>:<item-id>`.
///
/// Pairings are partition-scoped because menu pairings depend on the
/// restaurant's menu.
#[inline]
pub fn pairing_key(partition: &str, item_id: &str) -> String {
    format!("{}:{}:{}", TextKind::Pairing.prefix(), partition, item_id)
}

/// A cached value with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            key: key.into(),
            value: value.into(),
            expires_at: now.checked_add(ttl).unwrap_or(now + Duration::from_secs(u32::MAX as u64)),
        }
    }

    /// Returns `true` once `now` has reached the expiry instant.
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
