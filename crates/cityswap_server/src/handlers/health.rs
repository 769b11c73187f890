//! Health check endpoint

use axum::Json;
use cityswap_api::responses::{HealthResponse, HealthStatus};

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: cityswap_api::API_VERSION.to_string(),
    })
}
