//! Transport mapping for registry failures

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use connhub_core::RequestError;

/// A [`RequestError`] rendered as an HTTP response with its own status
#[derive(Debug)]
pub struct ApiError(pub RequestError);

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        tracing::warn!(
            error_code = %self.0.code,
            error_message = %self.0.message,
            status = status.as_u16(),
            "API error"
        );

        (status, Json(self.0)).into_response()
    }
}
