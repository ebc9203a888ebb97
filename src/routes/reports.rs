//! Report history and PDF download routes

use super::extract::{AuthUser, JsonBody};
use crate::error::{Result, SoilCheckError};
use crate::models::{AnalysisResult, Report};
use crate::pdf::{self, ReportMeta};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct ReportsResponse {
    pub reports: Vec<Report>,
}

#[derive(Deserialize)]
pub struct GenerateReportRequest {
    pub result: AnalysisResult,
}

pub async fn my_reports(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ReportsResponse>> {
    let db = state.db.clone();
    let reports =
        tokio::task::spawn_blocking(move || db.list_reports_for_user(&claims.user_id)).await??;

    Ok(Json(ReportsResponse { reports }))
}

/// Render a PDF for a result supplied by the client.
pub async fn generate_report(
    AuthUser(_claims): AuthUser,
    JsonBody(payload): JsonBody<GenerateReportRequest>,
) -> Result<Response> {
    let meta = ReportMeta::now();
    let filename = meta.filename();
    let bytes = tokio::task::spawn_blocking(move || pdf::render(&payload.result, &meta)).await??;

    Ok(pdf_response(bytes, &filename))
}

/// Render a PDF for one of the caller's stored reports.
pub async fn report_pdf(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(report_id): Path<String>,
) -> Result<Response> {
    let db = state.db.clone();
    let lookup_id = report_id.clone();
    let report =
        tokio::task::spawn_blocking(move || db.get_report_for_user(&claims.user_id, &lookup_id))
            .await??
            .ok_or_else(|| SoilCheckError::NotFound(format!("report {}", report_id)))?;

    let meta =
        ReportMeta::at(report.created_at.with_timezone(&Local)).with_report_id(&report.id);
    let filename = meta.filename();
    let bytes = tokio::task::spawn_blocking(move || pdf::render(&report.result, &meta)).await??;

    Ok(pdf_response(bytes, &filename))
}

fn pdf_response(bytes: Vec<u8>, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
