use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error envelope for the HTTP surface: validation failures map to 400,
/// everything else collapses to a 500 with a `detail` message, the shape the
/// UI expects.
pub struct ApiError(pub ps_core::Error);

impl From<ps_core::Error> for ApiError {
    fn from(e: ps_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ps_core::Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("request failed: {}", self.0);
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
