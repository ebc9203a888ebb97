//! API routes

pub mod analysis;
pub mod auth;
pub mod error;
pub mod extract;
pub mod reports;

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Soil Data Management API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
