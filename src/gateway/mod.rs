//! HTTP gateway (Axum) over [`crate::pipeline::Recommender`].
//!
//! This module is primarily used by the `sommelier` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::recommend_handler;
pub use payload::{RecommendRequest, RecommendResponse, WineRecommendation};
pub use state::HandlerState;

use crate::embedding::EmbeddingService;
use crate::llm::LanguageModel;
use crate::vectordb::CatalogIndex;

/// Response header carrying the selection outcome or error code.
pub const SOMMELIER_STATUS_HEADER: &str = "x-sommelier-status";

pub fn create_router_with_state<E, I, L>(state: HandlerState<E, I, L>) -> Router
where
    E: EmbeddingService + 'static,
    I: CatalogIndex + 'static,
    L: LanguageModel + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/v1/recommend", post(recommend_handler::<E, I, L>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(SOMMELIER_STATUS_HEADER, HeaderValue::from_static("healthy"));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}
