use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness check for the HTTP transport
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
