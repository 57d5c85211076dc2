//! Location Cache - read-through caching for country/state/city reference data
//!
//! Runs the location API over an in-memory backing store.

use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use location_cache::api::create_router;
use location_cache::backing::{MemoryStore, SeedData};
use location_cache::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the location service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the backing store (seeded from `SEED_FILE` if set)
/// 4. Create the cache, repository and background sweep task
/// 5. Serve the Axum router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "location_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting location cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, port={}, cleanup_interval={}s, states_sliding={}s, cities_absolute={}s",
        config.max_entries,
        config.server_port,
        config.cleanup_interval,
        config.states_sliding_secs,
        config.cities_absolute_secs
    );

    let backing = match &config.seed_file {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading seed file {}", path.display()))?;
            let seed: SeedData = serde_json::from_str(&raw)
                .with_context(|| format!("parsing seed file {}", path.display()))?;
            let store = MemoryStore::from_seed(seed).context("loading seed data")?;
            info!("Backing store seeded from {}", path.display());
            store
        }
        None => {
            warn!("SEED_FILE not set, starting with an empty backing store");
            MemoryStore::new()
        }
    };

    let state = AppState::from_config(&config, Arc::new(backing));
    info!("Location cache initialized");

    let cleanup_handle = spawn_cleanup_task(state.cache(), config.cleanup_interval);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Expiry sweep task aborted");
}
