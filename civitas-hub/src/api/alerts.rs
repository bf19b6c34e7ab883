//! Alert endpoints
//!
//! Issued alerts are rewritten into the domain vocabulary and translated into
//! every glossary language before they are stored.

use axum::{extract::State, routing::get, Json, Router};
use civitas_common::assist::{translate::supported_languages, RewriteOptions, TranslateOptions};
use civitas_common::db::{alerts, Alert, NewAlert};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{ApiResult, AppState};

/// Maximum alerts returned by GET /api/alerts
const ALERT_LIST_LIMIT: i64 = 50;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAlertResponse {
    pub id: i64,
    pub rewritten_message: String,
    pub translated_messages: BTreeMap<String, String>,
}

/// GET /api/alerts
pub async fn list_alerts(State(state): State<AppState>) -> ApiResult<Json<Vec<Alert>>> {
    let alerts = alerts::list_alerts(&state.db, ALERT_LIST_LIMIT).await?;
    Ok(Json(alerts))
}

/// POST /api/alerts
pub async fn create_alert(
    State(state): State<AppState>,
    Json(alert): Json<NewAlert>,
) -> ApiResult<Json<CreateAlertResponse>> {
    alert.validate()?;

    let rewritten_message = state
        .assist
        .rewrite(&alert.message, &RewriteOptions::default())
        .await;

    let mut translated_messages = BTreeMap::new();
    for lang in supported_languages() {
        let translated = state
            .assist
            .translate(&rewritten_message, &TranslateOptions::to(*lang))
            .await;
        translated_messages.insert(lang.to_string(), translated);
    }

    let id = alerts::create_alert(&state.db, &alert, Some(&rewritten_message), &translated_messages)
        .await?;
    tracing::info!(alert_id = id, severity = %alert.severity, "Alert issued");

    Ok(Json(CreateAlertResponse {
        id,
        rewritten_message,
        translated_messages,
    }))
}

/// Build alert routes
pub fn alert_routes() -> Router<AppState> {
    Router::new().route("/api/alerts", get(list_alerts).post(create_alert))
}
