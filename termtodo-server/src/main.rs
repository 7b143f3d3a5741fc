//! `TermTodo` Server -- JSON CRUD backend for task records.
//!
//! An axum HTTP server exposing `/api/todos`, storing tasks in memory
//! keyed by their client-generated external id.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:5000
//! cargo run --bin termtodo-server
//!
//! # Run on custom address
//! cargo run --bin termtodo-server -- --bind 127.0.0.1:8080
//!
//! # Or via environment variable
//! TERMTODO_ADDR=127.0.0.1:8080 cargo run --bin termtodo-server
//! ```

use std::sync::Arc;

use clap::Parser;
use termtodo_server::api::{self, AppState};
use termtodo_server::config::{ServerCliArgs, ServerConfig};

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting termtodo server");

    let state = Arc::new(AppState::new());

    match api::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "todo server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "todo server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start todo server");
            std::process::exit(1);
        }
    }
}
