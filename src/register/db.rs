//! SQLite database connection and schema management for the risk register
//!
//! Opens (or creates) the register database and makes sure the `risks`
//! table exists. There is no migration path: the table is created once
//! and its shape is fixed.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::error::RegisterError;

/// Database wrapper for risk register data
///
/// Cheap to clone; every clone shares the same connection. The connection is
/// closed when the last clone is dropped.
#[derive(Clone)]
pub struct RegisterDb {
    conn: Arc<Mutex<Connection>>,
}

impl RegisterDb {
    /// Open or create the register database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open risk register db: {}", path.display()))?;

        // WAL lets readers proceed while an import is writing
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory database with the same schema
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory db")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Lock the connection for the duration of the returned guard
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, RegisterError> {
        self.conn
            .lock()
            .map_err(|_| RegisterError::Storage("risk register db lock poisoned".to_string()))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to create risks table")?;
        Ok(())
    }
}

/// SQL schema for the register database
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS risks (
    item_name TEXT,
    id INTEGER PRIMARY KEY AUTOINCREMENT,  -- assigned on insert, never reused
    risk_id TEXT,                          -- user-supplied code, not unique
    risk_description TEXT,
    likelihood INTEGER,
    impact INTEGER,
    risk_score INTEGER,
    mitigation_actions TEXT,
    responsible_person TEXT,
    responsible_department TEXT,
    target_completion_date TEXT,
    status TEXT,
    stakeholders TEXT
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table_names(db: &RegisterDb) -> Vec<String> {
        let conn = db.conn().unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("risk_register.db");
        let db = RegisterDb::open(&db_path).unwrap();

        assert!(db_path.exists());
        assert!(table_names(&db).contains(&"risks".to_string()));
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("risk_register.db");

        {
            let db = RegisterDb::open(&db_path).unwrap();
            db.conn()
                .unwrap()
                .execute("INSERT INTO risks (item_name) VALUES ('Server')", [])
                .unwrap();
        }

        let db = RegisterDb::open(&db_path).unwrap();
        let count: i64 = db
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM risks", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_in_memory_has_schema() {
        let db = RegisterDb::open_in_memory().unwrap();
        assert!(table_names(&db).contains(&"risks".to_string()));
    }
}
