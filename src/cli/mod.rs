//! CLI command implementations

pub mod import;
pub mod init;
pub mod list;
pub mod serve;

use anyhow::Result;
use std::path::Path;

use riskreg::config::Config;
use riskreg::register::RiskRegister;

/// Load config and open the configured database
pub(crate) fn open_register(work_dir: &Path, config_path: Option<&Path>) -> Result<(Config, RiskRegister)> {
    let config = Config::load(work_dir, config_path)?;
    let register = RiskRegister::open(&config.database.resolve(work_dir))?;
    Ok((config, register))
}
