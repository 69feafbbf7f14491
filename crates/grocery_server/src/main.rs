//! Grocery store HTTP server entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, migrate the database once.
//! - Serve the product router until Ctrl+C or SIGTERM.

mod config;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{CliArgs, ServerConfig};
use grocery_core::db::open_db;
use grocery_http::{router, AppState};
use log::info;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_args(CliArgs::parse());
    config.validate()?;

    grocery_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(|err| anyhow!(err))?;

    // Fail fast on an unreadable or too-new database instead of on first request.
    drop(open_db(&config.db_path).with_context(|| {
        format!("failed to prepare database `{}`", config.db_path.display())
    })?);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let local_addr = listener.local_addr()?;
    info!(
        "event=server_start module=server status=ok bind={} db_path={}",
        local_addr,
        config.db_path.display()
    );

    axum::serve(listener, router(AppState::new(config.db_path.clone())))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("event=signal module=server status=error error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                log::error!("event=signal module=server status=error error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("event=shutdown module=server status=start signal=ctrl_c"),
        _ = terminate => info!("event=shutdown module=server status=start signal=sigterm"),
    }
}
