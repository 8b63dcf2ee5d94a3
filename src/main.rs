//! Time clock kiosk server.
//!
//! Loads configuration from `TIMECLOCK_CONFIG_DIR` (default
//! `./config/default`), seeds the store and serves the HTTP API.

use std::env;
use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info};

use timeclock_engine::api::{AppState, create_router};
use timeclock_engine::config::ConfigLoader;
use timeclock_engine::store::MemoryStore;

const CONFIG_DIR_VAR: &str = "TIMECLOCK_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> ExitCode {
    let config_dir = env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());

    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {}", config_dir, e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_target(false)
        .init();

    info!(
        kiosk = %config.kiosk().name,
        timezone = %config.timezone(),
        config_dir = %config_dir,
        "Server starting..."
    );

    let store = MemoryStore::new();
    let seeded = store.seed(config.seed_employees()).await;
    if !seeded.is_empty() {
        info!(count = seeded.len(), "Seeded employees from configuration");
    }

    let bind_address = config.bind_address().to_string();
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind_address = %bind_address, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    let app = create_router(AppState::new(config, store));
    info!(bind_address = %bind_address, "Listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
