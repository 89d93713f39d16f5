//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use sommelier::{
    CatalogItem, MockCatalog, MockEmbedder, MockLanguageModel, Recommender, RecommenderConfig,
    TextCache,
};

pub const EMBEDDING_DIM: usize = 4096;
pub const RESTAURANT: &str = "restaurantA";

pub type TestRecommender = Recommender<MockEmbedder, MockCatalog, MockLanguageModel>;

/// Wine list used across scenarios: (id, price, category, blurb).
pub const WINE_LIST: &[(&str, f64, &str, &str)] = &[
    ("napa-cab", 85.0, "Red", "bold red cabernet sauvignon napa steak"),
    ("barossa-shiraz", 65.0, "Red", "bold red shiraz barossa steak pepper"),
    ("brunello", 160.0, "Red", "bold red sangiovese brunello steak"),
    ("sancerre", 55.0, "White", "crisp white sauvignon blanc sancerre oysters"),
    ("mosel-riesling", 38.0, "White", "off-dry white riesling mosel spicy"),
    ("champagne", 240.0, "Sparkling", "celebration sparkling champagne brioche"),
];

pub fn wine(id: &str, price: f64, category: &str, blurb: &str) -> CatalogItem {
    CatalogItem::new(id, RESTAURANT, format!("{id} estate"))
        .with_region("Test Valley", "Testland")
        .with_grapes("House Blend")
        .with_category(category)
        .with_price(price)
        .with_blurb(blurb)
}

pub fn seeded_catalog(embedder: &MockEmbedder) -> MockCatalog {
    let catalog = MockCatalog::new();
    for (id, price, category, blurb) in WINE_LIST {
        catalog.insert(wine(id, *price, category, blurb), embedder.vector_for(blurb));
    }
    catalog
}

pub fn test_cache() -> TextCache {
    TextCache::in_memory(1_000, Duration::from_secs(3600))
}

pub fn build_recommender(
    embedder: MockEmbedder,
    catalog: MockCatalog,
    model: MockLanguageModel,
    cache: TextCache,
) -> TestRecommender {
    Recommender::new(embedder, catalog, model, cache, RecommenderConfig::default())
}

/// Replies like a sommelier: a long note for note prompts, two foods for
/// pairing prompts, and `selection` for the arbiter.
pub fn scripted_model(selection: &'static str) -> MockLanguageModel {
    MockLanguageModel::with_responder(move |prompt| {
        let reply = if prompt.user.contains("Select the 2 wines") {
            selection
        } else if prompt.user.contains("food pairings") {
            "Pairs well with dry-aged ribeye and roasted mushrooms."
        } else {
            "Dark fruit and cedar on the nose, with a firm, savoury palate and long finish."
        };
        Ok(reply.to_string())
    })
}
