use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use super::SOMMELIER_STATUS_HEADER;
use super::error::GatewayError;
use super::payload::{RecommendRequest, RecommendResponse, WineRecommendation};
use super::state::HandlerState;
use crate::constraint::wants_pairing;
use crate::embedding::EmbeddingService;
use crate::llm::LanguageModel;
use crate::vectordb::CatalogIndex;

#[instrument(skip(state, request), fields(partition = tracing::field::Empty))]
pub async fn recommend_handler<E, I, L>(
    State(state): State<HandlerState<E, I, L>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    E: EmbeddingService + 'static,
    I: CatalogIndex + 'static,
    L: LanguageModel + 'static,
{
    let request: RecommendRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;
    validate_request(&request)?;
    tracing::Span::current().record("partition", tracing::field::display(&request.partition));

    let include_pairing = request
        .include_pairing
        .unwrap_or_else(|| wants_pairing(&request.query));
    debug!(include_pairing, "Processing recommendation request");

    let outcome = state
        .recommender
        .run(&request.query, &request.partition, include_pairing)
        .await?;

    let response = RecommendResponse {
        id: format!("rec-{}", uuid::Uuid::new_v4()),
        created: chrono::Utc::now().timestamp(),
        selection: outcome.selection,
        constraint: outcome.constraint,
        recommendations: outcome
            .results
            .into_iter()
            .map(|r| WineRecommendation::from_result(r, &state.thresholds))
            .collect(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        SOMMELIER_STATUS_HEADER,
        HeaderValue::from_static(response.selection.as_str()),
    );

    Ok((StatusCode::OK, headers, Json(response)).into_response())
}

pub(crate) fn validate_request(request: &RecommendRequest) -> Result<(), GatewayError> {
    if request.query.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "'query' must not be empty".to_string(),
        ));
    }
    if request.partition.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "'partition' must not be empty".to_string(),
        ));
    }
    Ok(())
}
