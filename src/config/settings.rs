//! Settings sections of the config file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind
    /// Default: "127.0.0.1"
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (0 picks a free port)
    /// Default: 8080
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of threads pulling requests off the listener
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Limit for JSON request bodies
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Limit for CSV uploads on /risks/import
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    4
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024 // 2 MiB
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            max_body_bytes: default_max_body_bytes(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file; relative paths resolve against the work dir
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl DatabaseSettings {
    /// Absolute (or work-dir relative) location of the database file
    pub fn resolve(&self, work_dir: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            work_dir.join(&self.path)
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("risk_register.db")
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}
