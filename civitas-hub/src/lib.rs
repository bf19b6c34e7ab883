//! civitas-hub library interface
//!
//! Exposes the router and application state for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use civitas_common::assist::{FallbackAssist, TextAssist};
use civitas_common::events::EventBus;
use services::PeerRegistry;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Text assist backend (remote with fallback, or fallback only)
    pub assist: Arc<dyn TextAssist>,
    /// Event bus feeding the mesh event stream
    pub event_bus: EventBus,
    /// Known mesh peers
    pub peers: PeerRegistry,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, assist: Arc<dyn TextAssist>, event_bus: EventBus) -> Self {
        Self {
            db,
            assist,
            event_bus,
            peers: PeerRegistry::new(),
            startup_time: Utc::now(),
        }
    }

    /// State with the local fallback backend
    pub fn with_fallback(db: SqlitePool, event_bus: EventBus) -> Self {
        Self::new(db, Arc::new(FallbackAssist), event_bus)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::assist_routes())
        .merge(api::mesh_routes())
        .merge(api::report_routes())
        .merge(api::alert_routes())
        .merge(api::mission_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
