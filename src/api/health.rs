use axum::{http::StatusCode, response::IntoResponse};

/// GET /healthz - Liveness probe
pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
