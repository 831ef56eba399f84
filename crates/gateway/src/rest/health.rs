use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub version: String,
    pub checked_at: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn health_check() -> ApiResponse<HealthStatus> {
    ApiResponse::ok(
        "service is healthy",
        HealthStatus {
            version: env!("CARGO_PKG_VERSION").to_string(),
            checked_at: Utc::now().to_rfc3339(),
        },
    )
}
