// SPDX-FileCopyrightText: 2026 Chairside Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chairside serve` command implementation.
//!
//! Opens the SQLite store, builds the gateway with its limits taken from
//! configuration, and serves until interrupted. The store is constructed
//! here and injected into the gateway as a trait object; nothing else in
//! the process holds database state.

use std::sync::Arc;

use tracing::info;

use chairside_config::model::ChairsideConfig;
use chairside_core::{ChairsideError, PracticeStore};
use chairside_gateway::{start_server, AppState, RequestLimits, ServerConfig};
use chairside_storage::SqliteStore;

/// Runs the `chairside serve` command.
pub async fn run_serve(config: ChairsideConfig) -> Result<(), ChairsideError> {
    init_tracing(&config.service.log_level);

    info!(service = config.service.name.as_str(), "starting chairside serve");

    // Initialize storage.
    let store = Arc::new(SqliteStore::new(config.storage.clone()));
    store.initialize().await?;
    info!(path = config.storage.database_path.as_str(), "storage ready");

    let state = AppState {
        store: store.clone() as Arc<dyn PracticeStore>,
        limits: RequestLimits {
            max_upload_bytes: config.attachments.max_upload_bytes,
            default_page_size: config.notifications.default_page_size,
            max_page_size: config.notifications.max_page_size,
        },
    };

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    start_server(&server_config, state, shutdown_signal()).await?;

    // Flush the WAL before exiting.
    store.close().await?;
    info!("chairside serve shutdown complete");
    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "chairside={log_level},chairside_gateway={log_level},chairside_storage={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
