//! Configuration loading and management

mod settings;

pub use settings::{DatabaseSettings, ServerSettings};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Storage settings
    #[serde(default)]
    pub database: DatabaseSettings,
}

impl Config {
    /// Project-local config location: `<dir>/.riskreg/config.toml`
    pub fn local_config_path(dir: &Path) -> PathBuf {
        dir.join(".riskreg").join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for: .riskreg/config.toml (preferred) or riskreg.toml
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let local_path = Self::local_config_path(dir);
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        let flat_path = dir.join("riskreg.toml");
        if flat_path.exists() {
            return Self::from_file(&flat_path);
        }

        Ok(Self::default())
    }

    /// Explicit `--config` path wins over directory lookup
    pub fn load(work_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::from_dir(work_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.server.workers, 4);
        assert_eq!(config.database.path, PathBuf::from("risk_register.db"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9090
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database, DatabaseSettings::default());
    }

    #[test]
    fn test_from_dir_prefers_local_config() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".riskreg")).unwrap();
        std::fs::write(
            Config::local_config_path(dir.path()),
            "[database]\npath = \"local.db\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("riskreg.toml"), "[database]\npath = \"flat.db\"\n").unwrap();

        let config = Config::from_dir(dir.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("local.db"));
    }

    #[test]
    fn test_from_dir_without_file_is_default() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::from_dir(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(dir.path(), Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }

    #[test]
    fn test_relative_db_path_resolves_against_work_dir() {
        let settings = DatabaseSettings::default();
        assert_eq!(
            settings.resolve(Path::new("/srv/risks")),
            PathBuf::from("/srv/risks/risk_register.db")
        );
    }
}
