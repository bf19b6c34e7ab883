//! Mesh peer-sync endpoints
//!
//! The radio/mesh transport is a separate process. It pushes peer batches to
//! `/api/mesh/sync`, announces peers through `/api/mesh/discover`, and relays
//! whatever `/api/mesh/events` streams.

use axum::{
    extract::State,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use civitas_common::db::{alerts, reports};
use civitas_common::events::CivitasEvent;
use civitas_common::sync::{merge_records, ExternalRecord};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::convert::Infallible;
use tracing::{debug, info};
use uuid::Uuid;

use crate::services::{MeshStatus, PeerInfo};
use crate::{ApiResult, AppState};

/// POST /api/mesh/sync body
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    #[serde(rename = "type")]
    pub sync_type: String,
    #[serde(default)]
    pub peer_id: Option<String>,
    #[serde(default)]
    pub reports: Vec<ExternalRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    pub status: String,
    pub received: usize,
    pub inserted: u64,
    pub skipped: u64,
}

/// POST /api/mesh/broadcast body
#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    #[serde(rename = "type")]
    pub broadcast_type: String,
    #[serde(default)]
    pub alert_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /api/mesh/discover body (optional)
#[derive(Debug, Default, Deserialize)]
pub struct DiscoverRequest {
    #[serde(default)]
    pub peer_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub signal: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct DiscoverResponse {
    pub success: bool,
    pub devices_found: usize,
    pub devices: Vec<PeerInfo>,
}

/// POST /api/mesh/sync
///
/// Merges a peer's report batch. Reports whose id already exists locally are
/// skipped, never overwritten; re-sending a batch is harmless.
pub async fn sync(
    State(state): State<AppState>,
    Json(request): Json<SyncRequest>,
) -> ApiResult<Json<SyncResponse>> {
    if request.sync_type != "reports" {
        debug!(sync_type = %request.sync_type, "Ignoring unsupported sync type");
        return Ok(Json(SyncResponse {
            status: "synced".to_string(),
            received: 0,
            inserted: 0,
            skipped: 0,
        }));
    }

    let peer_id = request.peer_id.filter(|id| !id.trim().is_empty());
    let received = request.reports.len();
    let ids: Vec<i64> = request.reports.iter().map(|r| r.id).collect();
    let existing = reports::existing_report_ids(&state.db, &ids).await?;

    let to_insert = merge_records(&existing, request.reports);
    let inserted = reports::insert_synced_reports(&state.db, &to_insert).await?;
    let skipped = received as u64 - inserted;

    info!(
        peer_id = peer_id.as_deref().unwrap_or("unknown"),
        received,
        inserted,
        skipped,
        "Merged mesh report batch"
    );

    state.peers.record_sync(peer_id.as_deref(), received).await;
    state.event_bus.emit_lossy(CivitasEvent::ReportsSynced {
        peer_id,
        received,
        inserted,
        timestamp: Utc::now(),
    });

    Ok(Json(SyncResponse {
        status: "synced".to_string(),
        received,
        inserted,
        skipped,
    }))
}

/// POST /api/mesh/broadcast
///
/// `alert` broadcasts of a known alert return the relayed payload; anything
/// else is acknowledged with `broadcast_ready`.
pub async fn broadcast(
    State(state): State<AppState>,
    Json(request): Json<BroadcastRequest>,
) -> ApiResult<Json<Value>> {
    if request.broadcast_type == "alert" {
        if let Some(alert_id) = request.alert_id {
            if let Some(alert) = alerts::get_alert(&state.db, alert_id).await? {
                let message = alert.broadcast_message().to_string();

                state.event_bus.emit_lossy(CivitasEvent::AlertBroadcast {
                    broadcast_id: Uuid::new_v4(),
                    alert_id: alert.id,
                    title: alert.title.clone(),
                    message: message.clone(),
                    severity: alert.severity.clone(),
                    created_at: alert.created_at.clone(),
                    timestamp: Utc::now(),
                });
                info!(alert_id = alert.id, "Alert queued for mesh broadcast");

                return Ok(Json(json!({
                    "type": "alert",
                    "data": {
                        "id": alert.id,
                        "title": alert.title,
                        "message": message,
                        "severity": alert.severity,
                        "created_at": alert.created_at,
                    }
                })));
            }
            debug!(alert_id, "Broadcast requested for unknown alert");
        }
    } else if let Some(message) = request.message {
        state.event_bus.emit_lossy(CivitasEvent::MeshBroadcast {
            broadcast_id: Uuid::new_v4(),
            kind: request.broadcast_type,
            message,
            timestamp: Utc::now(),
        });
    }

    Ok(Json(json!({ "status": "broadcast_ready" })))
}

/// GET /api/mesh/status
pub async fn status(State(state): State<AppState>) -> Json<MeshStatus> {
    Json(state.peers.status().await)
}

/// POST /api/mesh/discover
///
/// Optionally announces the caller, then lists active peers.
pub async fn discover(
    State(state): State<AppState>,
    request: Option<Json<DiscoverRequest>>,
) -> Json<DiscoverResponse> {
    let request = request.map(|Json(body)| body).unwrap_or_default();

    if let Some(peer_id) = request.peer_id.as_deref().filter(|id| !id.trim().is_empty()) {
        state.peers.announce(peer_id, request.role, request.signal).await;
    }

    let devices = state.peers.active_peers().await;
    Json(DiscoverResponse {
        success: true,
        devices_found: devices.len(),
        devices,
    })
}

/// GET /api/mesh/events - SSE stream of events to relay to peers
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    civitas_common::sse::create_event_sse_stream("mesh", &state.event_bus, CivitasEvent::is_mesh_relay)
}

/// Build mesh routes
pub fn mesh_routes() -> Router<AppState> {
    Router::new()
        .route("/api/mesh/sync", post(sync))
        .route("/api/mesh/broadcast", post(broadcast))
        .route("/api/mesh/status", get(status))
        .route("/api/mesh/discover", post(discover))
        .route("/api/mesh/events", get(event_stream))
}
