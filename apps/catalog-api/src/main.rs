//! Catalog API - paginated, searchable item catalog backed by a JSON file

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_catalog::{CatalogService, JsonFileStore, StoreWatcher};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(
        "Using item store at {}",
        config.store.data_path.display()
    );

    let store = Arc::new(JsonFileStore::new(&config.store.data_path));
    let service = CatalogService::new(Arc::clone(&store));

    // Prime the stats cache; a missing data file is not fatal at startup,
    // the first /stats request will retry
    if let Err(e) = service.stats_cache().recompute().await {
        tracing::warn!("Initial stats computation failed: {}", e);
    }

    // Watch the data file and refresh stats on changes
    let watcher = StoreWatcher::start(
        config.store.data_path.clone(),
        service.stats_cache(),
        config.store.watch_poll_interval,
    )
    .map_err(|e| eyre::eyre!("Failed to start store watcher: {}", e))?;

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        service,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge the /health liveness endpoint into the app
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting Catalog API on port {}",
        state.config.server.port
    );

    // Production-ready server with graceful shutdown and cleanup
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30), // 30s graceful shutdown timeout
        async move {
            info!("Shutting down: stopping store watcher");
            watcher.stop().await;
            info!("Store watcher stopped");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
