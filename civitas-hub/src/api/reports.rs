//! Incident report endpoints
//!
//! Minimal create/list surface over the report store. New reports get an
//! assist summary of their description.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use civitas_common::assist::SummaryOptions;
use civitas_common::db::{reports, NewReport, Report};
use civitas_common::events::CivitasEvent;
use civitas_common::Error;
use serde::{Deserialize, Serialize};

use crate::{ApiResult, AppState};

/// Query parameters for GET /api/reports
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateReportResponse {
    pub id: i64,
    pub ai_summary: String,
}

/// GET /api/reports?user_id=N
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Vec<Report>>> {
    let reports = reports::list_reports(&state.db, query.user_id).await?;
    Ok(Json(reports))
}

/// GET /api/reports/:id
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Report>> {
    let report = reports::get_report(&state.db, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("report {}", id)))?;
    Ok(Json(report))
}

/// POST /api/reports
pub async fn create_report(
    State(state): State<AppState>,
    Json(report): Json<NewReport>,
) -> ApiResult<Json<CreateReportResponse>> {
    report.validate()?;

    let ai_summary = state
        .assist
        .summarize(&report.description, &SummaryOptions::default())
        .await;
    let id = reports::create_report(&state.db, &report, Some(&ai_summary)).await?;

    state.event_bus.emit_lossy(CivitasEvent::ReportCreated {
        report_id: id,
        severity: report.severity.clone(),
        timestamp: Utc::now(),
    });

    Ok(Json(CreateReportResponse { id, ai_summary }))
}

/// Build report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/api/reports", get(list_reports).post(create_report))
        .route("/api/reports/:id", get(get_report))
}
