//! Serve command implementation

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use riskreg::config::Config;
use riskreg::http_server::RiskServer;
use riskreg::register::RiskRegister;

/// Run the HTTP API until Ctrl-C
///
/// Failing to open the database or bind the port is fatal.
pub async fn serve_command(
    work_dir: &Path,
    config_path: Option<&Path>,
    port: Option<u16>,
    db: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load(work_dir, config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(db) = db {
        config.database.path = db;
    }

    let db_path = config.database.resolve(work_dir);
    let register = RiskRegister::open(&db_path)?;
    info!("Using risk register database {}", db_path.display());

    let server = RiskServer::start(&config.server, Arc::new(register.repository().clone()))?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    info!("Shutting down");
    server.shutdown();
    Ok(())
}
