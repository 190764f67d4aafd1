//! Health check handler.

use axum::Json;

use crate::dto::response::HealthResponse;

/// GET /healthcheck
pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
