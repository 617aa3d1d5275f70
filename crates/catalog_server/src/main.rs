//! `catalog_server` entry point.
//!
//! Reads configuration from the environment, opens storage, and serves the
//! product API until Ctrl-C.

use catalog_core::db::{open_db, open_db_in_memory};
use catalog_core::{flush_logs, init_logging, ApiKeyGate};
use catalog_server::{build_router, AppState, ServerConfig};
use log::{error, info};
use std::error::Error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let outcome = run().await;
    let code = match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=server status=error error={err}");
            eprintln!("catalog_server: {err}");
            ExitCode::FAILURE
        }
    };
    flush_logs();
    code
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, &config.log_dir.to_string_lossy())?;
    info!(
        "event=config_loaded module=server status=ok bind_addr={} api_prefix={} storage={}",
        config.bind_addr,
        config.api_prefix,
        if config.db_path.is_some() { "file" } else { "memory" }
    );

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let gate = ApiKeyGate::with_prefix(config.api_key.clone(), &config.api_prefix)?;
    let app = build_router(AppState::new(conn, gate));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_listen module=server status=ok addr={}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=signal_listen module=server status=error error={err}");
    }
}
