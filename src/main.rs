//! NoteHub server: OAuth2 login and personal notes.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use notehub_api::{AppState, init_store, run_server};
use notehub_core::config::AppConfig;
use notehub_core::result::AppResult;

#[tokio::main]
async fn main() {
    let env = std::env::var("NOTEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &env).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig, env: &str) -> AppResult<()> {
    tracing::info!(
        env,
        mode = ?config.auth.mode,
        storage = ?config.storage.backend,
        "Starting NoteHub v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = init_store(&config).await?;
    let state = AppState::new(config, store)?;

    run_server(state).await
}
