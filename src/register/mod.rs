//! Risk register core: record model, SQLite store and CSV importer
//!
//! # Usage
//!
//! ```ignore
//! let register = RiskRegister::open(Path::new("risk_register.db"))?;
//!
//! let created = register.repository().create(&record)?;
//! let imported = register.importer().import(std::fs::File::open("risks.csv")?)?;
//! ```

mod db;
mod error;
pub mod import;
mod models;
mod repository;

pub use db::RegisterDb;
pub use error::RegisterError;
pub use import::{CsvImporter, ParsedRow, parse_rows};
pub use models::{RiskId, RiskRecord};
pub use repository::{RiskRepository, RiskStore};

use std::path::Path;

use anyhow::Result;

/// Entry point tying the database handle to the store and importer
#[derive(Clone)]
pub struct RiskRegister {
    repository: RiskRepository,
}

impl RiskRegister {
    /// Open or create the register database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let db = RegisterDb::open(path)?;
        Ok(Self::with_db(db))
    }

    pub fn with_db(db: RegisterDb) -> Self {
        Self {
            repository: RiskRepository::new(db),
        }
    }

    pub fn repository(&self) -> &RiskRepository {
        &self.repository
    }

    pub fn importer(&self) -> CsvImporter<'_> {
        CsvImporter::new(&self.repository)
    }
}
