//! civitas-hub - Disaster-response coordination hub
//!
//! Serves the text assist API, the mesh peer-sync surface, and the report and
//! alert stores and missions over HTTP. Default listener: 127.0.0.1:5780.

use anyhow::{Context, Result};
use clap::Parser;
use civitas_common::assist::{FallbackAssist, TextAssist};
use civitas_common::config::{load_default_config, load_toml_config, prepare_root_folder, LoggingConfig};
use civitas_common::events::EventBus;
use civitas_hub::config::{CliArgs, HubSettings};
use civitas_hub::services::RemoteAssist;
use civitas_hub::{build_router, AppState};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Config is read before tracing starts so its log level can apply
    let toml_config = match &args.config {
        Some(path) => load_toml_config(path)?,
        None => load_default_config()?,
    };

    init_tracing(&toml_config.logging)?;

    // Log build identification immediately after tracing init
    info!(
        "Starting civitas-hub v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let settings = HubSettings::resolve(&args, &toml_config);
    info!("Root folder: {}", settings.root_folder.display());

    let db_path = prepare_root_folder(&settings.root_folder)
        .context("Failed to initialize root folder")?;
    info!("Database: {}", db_path.display());

    let db_pool = civitas_common::db::init_database(&db_path).await?;
    info!("Database connection established");

    let assist = build_assist(&settings);
    info!("Text assist backend: {}", assist.name());

    let event_bus = EventBus::new(100);
    let state = AppState::new(db_pool, assist, event_bus);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.listen_addr))?;
    info!("Listening on http://{}", settings.listen_addr);
    info!("Health check: http://{}/health", settings.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("civitas-hub stopped");
    Ok(())
}

/// RUST_LOG wins over the configured level; a configured log file replaces stdout
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

fn build_assist(settings: &HubSettings) -> Arc<dyn TextAssist> {
    let Some(url) = &settings.assist_api_url else {
        return Arc::new(FallbackAssist);
    };

    match RemoteAssist::new(url.clone(), settings.assist_timeout) {
        Ok(remote) => {
            info!("Remote assist API: {}", remote.base_url());
            Arc::new(remote)
        }
        Err(e) => {
            warn!("Remote assist unavailable ({}), using local fallback", e);
            Arc::new(FallbackAssist)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
