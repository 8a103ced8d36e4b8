//! Init command implementation

use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::info;

use riskreg::config::Config;

/// Default configuration content for riskreg init
pub const DEFAULT_CONFIG: &str = r#"# Risk Register Configuration
# ===========================

# ============================================================================
# SERVER - HTTP API
# ============================================================================
#
# Available options:
#   host             - Interface to bind (default: 127.0.0.1)
#   port             - Port to listen on, 0 picks a free one (default: 8080)
#   workers          - Threads serving requests (default: 4)
#   max_body_bytes   - Limit for JSON bodies (default: 2 MiB)
#   max_upload_bytes - Limit for CSV uploads on /risks/import (default: 10 MiB)

[server]
host = "127.0.0.1"
port = 8080
workers = 4
max_body_bytes = 2097152
max_upload_bytes = 10485760

# ============================================================================
# DATABASE - SQLite storage
# ============================================================================
#
# Relative paths resolve against the working directory (--path).
# The risks table is created on first start.

[database]
path = "risk_register.db"
"#;

/// Write the default config to `.riskreg/config.toml`
pub fn init_command(work_dir: &Path, force: bool) -> Result<()> {
    let config_path = Config::local_config_path(work_dir);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    info!("Created config file: {}", config_path.display());
    println!("Created {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_matches_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = tempdir().unwrap();
        init_command(dir.path(), false).unwrap();
        assert!(init_command(dir.path(), false).is_err());
        init_command(dir.path(), true).unwrap();
    }
}
