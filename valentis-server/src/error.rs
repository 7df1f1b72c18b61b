use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },
    #[error("API upstream not configured")]
    UpstreamNotConfigured,
    #[error("API upstream unreachable: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Proxy failures reach the browser in the backend's own `{"detail": ...}`
/// shape so the UI shows them like any other backend error.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request failed");
        let status = match self {
            ServerError::UpstreamNotConfigured | ServerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServerError::InvalidConfig { .. } | ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}
