//! Mission endpoints
//!
//! New missions get a strategy plan from the assist backend, generated from
//! the mission description for the coordinator role.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use civitas_common::assist::PromptContext;
use civitas_common::db::{missions, Mission, NewMission};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ApiResult, AppState};

/// Query parameters for GET /api/missions
#[derive(Debug, Deserialize)]
pub struct MissionQuery {
    pub assigned_to: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMissionResponse {
    pub id: i64,
    pub ai_strategy: String,
}

/// GET /api/missions?assigned_to=N
pub async fn list_missions(
    State(state): State<AppState>,
    Query(query): Query<MissionQuery>,
) -> ApiResult<Json<Vec<Mission>>> {
    let missions = missions::list_missions(&state.db, query.assigned_to).await?;
    Ok(Json(missions))
}

/// POST /api/missions
pub async fn create_mission(
    State(state): State<AppState>,
    Json(mission): Json<NewMission>,
) -> ApiResult<Json<CreateMissionResponse>> {
    mission.validate()?;

    let prompt = PromptContext {
        context: mission.description.clone(),
        task_type: mission.task_type.clone(),
        ..PromptContext::default()
    };
    let ai_strategy = state.assist.generate_prompt(&prompt).await;

    let id = missions::create_mission(&state.db, &mission, Some(&ai_strategy)).await?;
    info!(
        mission_id = id,
        priority = %mission.priority,
        task_type = %mission.task_type,
        "Mission created"
    );

    Ok(Json(CreateMissionResponse { id, ai_strategy }))
}

/// Build mission routes
pub fn mission_routes() -> Router<AppState> {
    Router::new().route("/api/missions", get(list_missions).post(create_mission))
}
