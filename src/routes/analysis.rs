//! Soil analysis route

use super::extract::{AuthUser, JsonBody};
use crate::error::Result;
use crate::models::{AnalysisResult, Report, SoilSample};
use crate::server::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub soil_data: Option<SoilSample>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub report_id: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

pub async fn analyze_suitability(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(payload): JsonBody<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    let sample = payload.soil_data.unwrap_or_default();
    let result = state.engine.analyze(&sample);

    let report = Report::new(claims.user_id, claims.email, result.clone());
    let db = state.db.clone();
    let stored = report.clone();
    tokio::task::spawn_blocking(move || db.insert_report(&stored)).await??;

    info!(
        report_id = %report.id,
        user_id = %report.user_id,
        classification = result.classification.symbol(),
        coarse_grained = result.classification.is_coarse_grained(),
        suitability = %result.suitability,
        "Stored soil analysis"
    );

    Ok(Json(AnalyzeResponse {
        report_id: report.id,
        result,
    }))
}
