//! Tests for the gateway router, handler, and error mapping.

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body, http::Request, http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::*;
use crate::cache::TextCache;
use crate::constraint::PriceThresholds;
use crate::embedding::MockEmbedder;
use crate::llm::MockLanguageModel;
use crate::pipeline::{FRIENDLY_MESSAGE, RecommendError, Recommender, RecommenderConfig};
use crate::vectordb::{CatalogItem, MockCatalog};

const DIM: usize = 1024;
const PARTITION: &str = "restaurantA";

fn seeded_catalog(embedder: &MockEmbedder) -> MockCatalog {
    let catalog = MockCatalog::new();
    for (id, price, blurb) in [
        ("cab", Some(85.0), "bold red cabernet for steak"),
        ("syrah", None, "bold red syrah for steak and lamb"),
        ("chablis", Some(45.0), "crisp white chardonnay oysters"),
    ] {
        let mut item = CatalogItem::new(id, PARTITION, format!("Producer {id}"))
            .with_region("Napa Valley", "USA")
            .with_category("Red")
            .with_grapes("Cabernet Sauvignon")
            .with_blurb(blurb)
            .with_price_range(crate::constraint::PriceBucket::Mid);
        if let Some(price) = price {
            item = item.with_price(price);
        }
        catalog.insert(item, embedder.vector_for(blurb));
    }
    catalog
}

fn router_with(embedder: MockEmbedder, catalog: MockCatalog, model: MockLanguageModel) -> Router {
    let recommender = Recommender::new(
        embedder,
        catalog,
        model,
        TextCache::in_memory(1_000, Duration::from_secs(3600)),
        RecommenderConfig::default(),
    );
    create_router_with_state(HandlerState::new(
        Arc::new(recommender),
        PriceThresholds::default(),
    ))
}

fn router(model: MockLanguageModel) -> Router {
    let embedder = MockEmbedder::new(DIM);
    let catalog = seeded_catalog(&embedder);
    router_with(embedder, catalog, model)
}

async fn post_json(router: Router, body: serde_json::Value) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/recommend")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    router.oneshot(request).await.unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();
    let response = router(MockLanguageModel::failing())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(SOMMELIER_STATUS_HEADER).unwrap(),
        "healthy"
    );
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_recommend_returns_two_wines() {
    let response = post_json(
        router(MockLanguageModel::failing()),
        serde_json::json!({"query": "bold red under $100", "partition": PARTITION}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(SOMMELIER_STATUS_HEADER).unwrap(),
        "FALLBACK_TOP2"
    );
    let body = json_body(response).await;
    assert!(body["id"].as_str().unwrap().starts_with("rec-"));
    assert_eq!(body["selection"], "fallback_top_two");
    assert_eq!(body["constraint"]["upper"], 100.0);

    let wines = body["recommendations"].as_array().unwrap();
    assert_eq!(wines.len(), 2);
    for wine in wines {
        assert!(!wine["tasting_note"].as_str().unwrap().is_empty());
        assert!(wine.get("pairing").is_none());
    }
}

#[tokio::test]
async fn test_missing_price_is_estimated_from_bucket() {
    let response = post_json(
        router(MockLanguageModel::failing()),
        serde_json::json!({"query": "syrah for lamb", "partition": PARTITION, "include_pairing": false}),
    )
    .await;

    let body = json_body(response).await;
    let syrah = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["id"] == "syrah")
        .cloned()
        .unwrap();
    assert_eq!(syrah["price"], 75.0);
}

#[tokio::test]
async fn test_pairing_inferred_from_food_words() {
    let response = post_json(
        router(MockLanguageModel::failing()),
        serde_json::json!({"query": "something to pair with steak", "partition": PARTITION}),
    )
    .await;

    let body = json_body(response).await;
    for wine in body["recommendations"].as_array().unwrap() {
        assert!(wine["pairing"].as_str().unwrap().contains("grilled meats"));
        assert_eq!(wine["pairing_source"], "canned");
    }
}

#[tokio::test]
async fn test_explicit_flag_overrides_inference() {
    let response = post_json(
        router(MockLanguageModel::failing()),
        serde_json::json!({
            "query": "something to pair with steak",
            "partition": PARTITION,
            "include_pairing": false
        }),
    )
    .await;

    let body = json_body(response).await;
    for wine in body["recommendations"].as_array().unwrap() {
        assert!(wine.get("pairing").is_none());
    }
}

#[tokio::test]
async fn test_empty_query_is_bad_request() {
    let response = post_json(
        router(MockLanguageModel::failing()),
        serde_json::json!({"query": "   ", "partition": PARTITION}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_schema_errors_are_bad_request() {
    for body in [
        serde_json::json!({"partition": PARTITION}),
        serde_json::json!({"query": "red", "partition": PARTITION, "stream": true}),
        serde_json::json!({"query": 7, "partition": PARTITION}),
    ] {
        let response = post_json(router(MockLanguageModel::failing()), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_embedding_outage_is_friendly_503() {
    let embedder = MockEmbedder::new(DIM);
    let catalog = seeded_catalog(&embedder);
    embedder.set_failing(true);

    let response = post_json(
        router_with(embedder, catalog, MockLanguageModel::failing()),
        serde_json::json!({"query": "bold red", "partition": PARTITION}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.headers().get(SOMMELIER_STATUS_HEADER).unwrap(),
        "embedding_unavailable"
    );
    let body = json_body(response).await;
    assert_eq!(body["error"], FRIENDLY_MESSAGE);
    assert_eq!(body["code"], "embedding_unavailable");
}

#[tokio::test]
async fn test_index_outage_is_friendly_503() {
    let embedder = MockEmbedder::new(DIM);
    let catalog = seeded_catalog(&embedder);
    catalog.set_failing(true);

    let response = post_json(
        router_with(embedder, catalog, MockLanguageModel::failing()),
        serde_json::json!({"query": "bold red", "partition": PARTITION}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["code"], "catalog_unavailable");
    assert!(!body["error"].as_str().unwrap().contains("Qdrant"));
}

#[tokio::test]
async fn test_error_into_response_mapping() {
    let response = GatewayError::Recommend(RecommendError::EmptyPartition).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = GatewayError::InvalidRequest("bad".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid request: bad");
}
