//! Run the Popravci directory API server.
//!
//! Usage: `cargo run --bin popravci [config.json]`
//!
//! The config path defaults to `$POPRAVCI_CONFIG`, then `popravci.json`.

use std::path::PathBuf;

use popravci::config::{load_from_env, CONFIG_FILENAME};
use popravci::telemetry::init_tracing;
use popravci::Server;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("POPRAVCI_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    let config = match load_from_env(&config_path) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("{error}");
            std::process::exit(1);
        }
    };

    let mut server = match Server::start(&config).await {
        Ok(server) => server,
        Err(error) => {
            tracing::error!("failed to start server: {error}");
            std::process::exit(1);
        }
    };

    if let Err(error) = server.catalog().snapshot().await {
        tracing::warn!("initial snapshot load failed, will retry on request: {error}");
    }

    tracing::info!("endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  POST /majstori/search   - Query the directory");
    tracing::info!("  GET  /majstori/facets   - Filter options");
    tracing::info!("  GET  /majstori/status   - Snapshot status");
    tracing::info!("  POST /majstori/refresh  - Reload the snapshot");
    tracing::info!("  GET  /majstori/:id      - Profile page data");

    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {error}");
    }
    tracing::info!("shutting down");
    if let Err(error) = server.shutdown() {
        tracing::warn!("{error}");
    }
}
