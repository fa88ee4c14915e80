//! Storage setup and initialization

use std::sync::Arc;

use anyhow::{Context, Result};
use tessera_core::Config;
use tessera_storage::{LocalStorage, Storage};

/// Create the uploads directory below the public root
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing local storage...");
    let storage = LocalStorage::new(&config.public_root, &config.uploads_dir)
        .await
        .context("Failed to initialize local storage")?;

    tracing::info!(
        base_path = %storage.base_path().display(),
        location = %storage.location(),
        "Local storage initialized successfully"
    );

    Ok(Arc::new(storage))
}
