use std::time::Duration;

use super::*;

const LONG_TTL: Duration = Duration::from_secs(3600);

#[test]
fn test_keys_are_identity_scoped() {
    assert_eq!(tasting_note_key("wine-7"), "tasting-note:wine-7");
    assert_eq!(pairing_key("maass", "wine-7"), "pairing:maass:wine-7");
    assert_ne!(tasting_note_key("wine-7"), tasting_note_key("wine-8"));
}

#[test]
fn test_entry_expiry_boundary() {
    let entry = CacheEntry::new("k", "v", Duration::from_secs(10));
    assert!(!entry.is_expired_at(entry.expires_at - Duration::from_millis(1)));
    assert!(entry.is_expired_at(entry.expires_at));
}

#[test]
fn test_memory_round_trip_before_expiry() {
    let cache = MemoryCache::new();
    cache.insert("tasting-note:a", "Dark cherry and cedar.", LONG_TTL);
    assert_eq!(
        cache.lookup("tasting-note:a").as_deref(),
        Some("Dark cherry and cedar.")
    );
}

#[test]
fn test_memory_read_after_expiry_is_miss() {
    let cache = MemoryCache::new();
    cache.insert("k", "v", Duration::from_millis(20));
    std::thread::sleep(Duration::from_millis(60));

    assert!(cache.lookup("k").is_none());
    assert!(!cache.contains("k"));
}

#[test]
fn test_memory_last_writer_wins() {
    let cache = MemoryCache::new();
    cache.insert("k", "first", LONG_TTL);
    cache.insert("k", "second", LONG_TTL);
    assert_eq!(cache.lookup("k").as_deref(), Some("second"));
}

#[test]
fn test_memory_remove_and_clear() {
    let cache = MemoryCache::new();
    cache.insert("a", "1", LONG_TTL);
    cache.insert("b", "2", LONG_TTL);
    cache.remove("a");
    assert!(cache.lookup("a").is_none());
    cache.clear();
    assert!(cache.lookup("b").is_none());
}

#[tokio::test]
async fn test_text_cache_in_memory_round_trip() {
    let cache = TextCache::in_memory(100, LONG_TTL);
    assert!(!cache.is_durable());

    cache.set("tasting-note:x", "Bright acidity, long finish.").await;
    assert_eq!(
        cache.get("tasting-note:x").await.as_deref(),
        Some("Bright acidity, long finish.")
    );
    assert!(cache.get("tasting-note:y").await.is_none());
}

#[tokio::test]
async fn test_text_cache_reads_durable_first() {
    let durable = MockCacheBackend::new();
    durable.insert("k", "from-durable", LONG_TTL);
    let cache = TextCache::with_durable(DurableCache::Mock(durable.clone()), 100, LONG_TTL);

    assert_eq!(cache.get("k").await.as_deref(), Some("from-durable"));
    assert_eq!(durable.read_count(), 1);
}

#[tokio::test]
async fn test_text_cache_writes_go_to_durable() {
    let durable = MockCacheBackend::new();
    let cache = TextCache::with_durable(DurableCache::Mock(durable.clone()), 100, LONG_TTL);

    cache.set("k", "v").await;

    assert_eq!(durable.peek("k").as_deref(), Some("v"));
    assert!(cache.memory().lookup("k").is_none());
}

#[tokio::test]
async fn test_text_cache_degrades_to_memory_when_durable_fails() {
    let durable = MockCacheBackend::failing();
    let cache = TextCache::with_durable(DurableCache::Mock(durable.clone()), 100, LONG_TTL);

    cache.set("k", "kept-in-memory").await;
    assert!(durable.is_empty());
    assert_eq!(cache.get("k").await.as_deref(), Some("kept-in-memory"));
}

#[tokio::test]
async fn test_text_cache_durable_outage_mid_flight() {
    let durable = MockCacheBackend::new();
    let cache = TextCache::with_durable(DurableCache::Mock(durable.clone()), 100, LONG_TTL);

    cache.set("k", "v1").await;
    durable.set_failing(true);

    assert!(cache.get("k").await.is_none());
    cache.set("k", "v2").await;
    assert_eq!(cache.get("k").await.as_deref(), Some("v2"));
}

#[tokio::test]
async fn test_text_cache_durable_timeout_is_absorbed() {
    let durable = MockCacheBackend::with_delay(Duration::from_millis(200));
    let cache = TextCache::with_durable(DurableCache::Mock(durable), 100, LONG_TTL)
        .timeout(Duration::from_millis(20));

    cache.set("k", "v").await;
    assert_eq!(cache.memory().lookup("k").as_deref(), Some("v"));
    assert_eq!(cache.get("k").await.as_deref(), Some("v"));
}

#[tokio::test]
async fn test_text_cache_connect_without_url_is_in_memory() {
    let cache = TextCache::connect(None, 10, LONG_TTL, Duration::from_millis(50)).await;
    assert!(!cache.is_durable());
}

#[tokio::test]
async fn test_text_cache_connect_mock_url() {
    let cache = TextCache::connect(Some("mock://"), 10, LONG_TTL, Duration::from_millis(50)).await;
    assert!(cache.is_durable());
}

#[tokio::test]
async fn test_text_cache_connect_unreachable_redis_falls_back() {
    let cache = TextCache::connect(
        Some("redis://127.0.0.1:1/0"),
        10,
        LONG_TTL,
        Duration::from_millis(200),
    )
    .await;
    assert!(!cache.is_durable());

    cache.set("k", "v").await;
    assert_eq!(cache.get("k").await.as_deref(), Some("v"));
}

#[tokio::test]
async fn test_text_cache_expired_entry_is_miss() {
    let cache = TextCache::in_memory(10, LONG_TTL);
    cache.set_with_ttl("k", "v", Duration::from_millis(20)).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(cache.get("k").await.is_none());
}
