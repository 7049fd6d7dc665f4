use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AggregatorError;

/// Error returned by HTTP handlers
#[derive(Debug)]
pub struct ApiError(AggregatorError);

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<AggregatorError> for ApiError {
    fn from(err: AggregatorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = if self.0.is_client_error() {
            (StatusCode::BAD_REQUEST, self.0.to_string())
        } else {
            tracing::error!("RSS aggregation failed: {}", self.0);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch RSS feeds".to_string(),
            )
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
