//! Bulk import of risk records from CSV files
//!
//! An import runs in two phases:
//!
//! 1. **Parse and validate** the whole file. Column-count and integer errors
//!    abort here, before anything touches the store.
//! 2. **Insert** rows one by one in file order. Each insert is its own unit of
//!    durability: if row N fails, rows before it stay in the store and the
//!    error reports how many were committed.

mod columns;
mod reader;

pub use columns::{COLUMN_COUNT, IMPORT_COLUMNS, RiskField, record_from_fields};
pub use reader::{ParsedRow, parse_rows};

use std::io::Read;

use tracing::{debug, info, warn};

use super::error::RegisterError;
use super::models::RiskRecord;
use super::repository::RiskStore;

/// Imports CSV files into a [`RiskStore`]
pub struct CsvImporter<'a> {
    store: &'a dyn RiskStore,
}

impl<'a> CsvImporter<'a> {
    pub fn new(store: &'a dyn RiskStore) -> Self {
        Self { store }
    }

    /// Validate and insert every data row of `input`.
    ///
    /// Returns the created records, with their assigned ids, in file order.
    pub fn import<R: Read>(&self, input: R) -> Result<Vec<RiskRecord>, RegisterError> {
        let rows = parse_rows(input)?;
        debug!("[riskreg:import] {} data rows validated", rows.len());

        let mut created = Vec::with_capacity(rows.len());
        for parsed in rows {
            match self.store.create(&parsed.record) {
                Ok(record) => created.push(record),
                Err(e) => {
                    warn!(
                        "[riskreg:import] Insert failed on row {} after {} committed rows: {}",
                        parsed.row,
                        created.len(),
                        e
                    );
                    return Err(RegisterError::ImportAborted {
                        row: parsed.row,
                        committed: created.len(),
                        source: Box::new(e),
                    });
                }
            }
        }

        info!("[riskreg:import] Imported {} risks", created.len());
        Ok(created)
    }
}
