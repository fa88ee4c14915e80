//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use tessera_core::Config;
use tessera_db::{PgFileRepository, PgFileTypeRepository};
use tessera_infra::LogFormat;

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    tessera_infra::init_telemetry("tessera-api", &config.environment, LogFormat::from_env())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(
        config,
        Arc::new(PgFileTypeRepository::new(pool.clone())),
        Arc::new(PgFileRepository::new(pool)),
        storage,
    ));

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
