use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::SOMMELIER_STATUS_HEADER;
use crate::pipeline::RecommendError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl GatewayError {
    fn parts(&self) -> (StatusCode, String, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string(), "invalid_request")
            }
            GatewayError::Recommend(e) if e.is_invalid_input() => {
                (StatusCode::BAD_REQUEST, e.user_message(), e.code())
            }
            GatewayError::Recommend(e) => (StatusCode::SERVICE_UNAVAILABLE, e.user_message(), e.code()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error, code) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "Recommendation failed");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            SOMMELIER_STATUS_HEADER,
            HeaderValue::from_str(code).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error,
            code,
            status: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
