use std::time::Duration;

use super::*;
use crate::constraint::parse_request;
use crate::embedding::MockEmbedder;
use crate::vectordb::{CatalogItem, MockCatalog};

const DIM: usize = 4096;
const PARTITION: &str = "restaurantA";

fn seeded() -> (MockEmbedder, MockCatalog) {
    let embedder = MockEmbedder::new(DIM);
    let catalog = MockCatalog::new();
    for (id, price, blurb) in [
        ("cab", 85.0, "bold red cabernet napa steak"),
        ("syrah", 140.0, "bold red syrah pepper steak"),
        ("riesling", 35.0, "crisp white riesling off-dry"),
        ("zin", 60.0, "bold red zinfandel jammy"),
    ] {
        let item = CatalogItem::new(id, PARTITION, id)
            .with_price(price)
            .with_blurb(blurb);
        catalog.insert(item, embedder.vector_for(blurb));
    }
    (embedder, catalog)
}

#[tokio::test]
async fn test_retrieve_respects_upper_bound() {
    let (embedder, catalog) = seeded();
    let retriever = Retriever::new(embedder, catalog, RetrieverConfig::default());

    let parsed = parse_request("bold red wine for steak under $100");
    let candidates = retriever
        .retrieve(&parsed.query, &parsed.constraint, PARTITION)
        .await
        .unwrap();

    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|c| c.item.price.unwrap() <= 100.0));
    assert_eq!(candidates[0].id(), "cab");
}

#[tokio::test]
async fn test_retrieve_unfiltered_when_no_price_language() {
    let (embedder, catalog) = seeded();
    let retriever = Retriever::new(embedder, catalog.clone(), RetrieverConfig::default());

    let parsed = parse_request("bold red for steak");
    let candidates = retriever
        .retrieve(&parsed.query, &parsed.constraint, PARTITION)
        .await
        .unwrap();

    assert_eq!(candidates.len(), 4);
    assert!(catalog.last_filter().unwrap().is_empty());
}

#[tokio::test]
async fn test_retrieve_does_not_widen_filter() {
    let (embedder, catalog) = seeded();
    let retriever = Retriever::new(embedder, catalog, RetrieverConfig::default());

    let parsed = parse_request("anything under $40");
    let candidates = retriever
        .retrieve(&parsed.query, &parsed.constraint, PARTITION)
        .await
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id(), "riesling");
}

#[tokio::test]
async fn test_retrieve_honours_top_k() {
    let (embedder, catalog) = seeded();
    let config = RetrieverConfig {
        top_k: 2,
        ..RetrieverConfig::default()
    };
    let retriever = Retriever::new(embedder, catalog, config);

    let parsed = parse_request("red");
    let candidates = retriever
        .retrieve(&parsed.query, &parsed.constraint, PARTITION)
        .await
        .unwrap();
    assert_eq!(candidates.len(), 2);
}

#[tokio::test]
async fn test_embedding_failure_is_fatal_and_skips_search() {
    let (embedder, catalog) = seeded();
    embedder.set_failing(true);
    let retriever = Retriever::new(embedder, catalog.clone(), RetrieverConfig::default());

    let parsed = parse_request("bold red");
    let err = retriever
        .retrieve(&parsed.query, &parsed.constraint, PARTITION)
        .await
        .unwrap_err();

    assert!(matches!(err, RetrievalError::Embedding(_)));
    assert_eq!(catalog.query_count(), 0);
}

#[tokio::test]
async fn test_index_failure_is_fatal() {
    let (embedder, catalog) = seeded();
    catalog.set_failing(true);
    let retriever = Retriever::new(embedder, catalog, RetrieverConfig::default());

    let parsed = parse_request("bold red");
    let err = retriever
        .retrieve(&parsed.query, &parsed.constraint, PARTITION)
        .await
        .unwrap_err();
    assert!(matches!(err, RetrievalError::Index(_)));
}

#[tokio::test]
async fn test_unknown_partition_yields_no_candidates() {
    let (embedder, catalog) = seeded();
    let retriever = Retriever::new(embedder, catalog, RetrieverConfig::default());

    let parsed = parse_request("bold red");
    let candidates = retriever
        .retrieve(&parsed.query, &parsed.constraint, "nowhere")
        .await
        .unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn test_default_config() {
    let config = RetrieverConfig::default();
    assert_eq!(config.top_k, 10);
    assert_eq!(config.embedding_timeout, Duration::from_secs(10));
}
