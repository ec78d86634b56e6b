//! Payroll API server.
//!
//! Loads the payroll configuration from `PAIE_CONFIG_DIR` (default
//! `./config/dz`) and serves the API on `PAIE_PORT` (default 8080).
//! Log verbosity follows `RUST_LOG`, defaulting to `info`.

use std::net::SocketAddr;
use std::process::ExitCode;

use paie_engine::api::{AppState, create_router};
use paie_engine::config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = std::env::var("PAIE_CONFIG_DIR").unwrap_or_else(|_| "./config/dz".to_string());
    let port: u16 = std::env::var("PAIE_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(
        company = %config.company().name,
        rubriques = config.catalog().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, error = %err, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };
    info!("paie-server listening on {addr}");

    if let Err(err) = axum::serve(listener, app.into_make_service()).await {
        error!(error = %err, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
