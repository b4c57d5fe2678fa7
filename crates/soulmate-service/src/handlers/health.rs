//! Liveness handlers.

use axum::Json;
use serde::Serialize;

/// Paths served by the relay, as advertised on `GET /`.
pub const ENDPOINTS: [&str; 4] = [
    "/api/test",
    "/api/submit-form",
    "/api/create-checkout-session",
    "/api/payment-success",
];

/// Root info response.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Server banner.
    pub message: String,
    /// Always "running".
    pub status: String,
    /// Available API endpoints.
    pub endpoints: Vec<String>,
}

/// Root endpoint.
pub async fn root() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "Divine Soulmate API Server".to_string(),
        status: "running".to_string(),
        endpoints: ENDPOINTS.iter().map(ToString::to_string).collect(),
    })
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "soulmate-relay".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
