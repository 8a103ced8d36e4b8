//! Error type shared by the store, the importer and the HTTP layer

use super::models::RiskId;

/// Errors surfaced by risk register operations
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Risk not found: {id}")]
    NotFound { id: RiskId },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Malformed CSV on row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    #[error("Invalid {field} value on row {row}: {value:?}")]
    ValidationError {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Error inserting risk on row {row} ({committed} rows committed): {source}")]
    ImportAborted {
        row: usize,
        committed: usize,
        #[source]
        source: Box<RegisterError>,
    },
}

impl RegisterError {
    /// Machine-readable kind used in JSON error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            RegisterError::NotFound { .. } => "not_found",
            RegisterError::InvalidInput(_) => "invalid_input",
            RegisterError::MalformedInput { .. } => "malformed_input",
            RegisterError::ValidationError { .. } => "validation_error",
            RegisterError::Storage(_) => "storage_error",
            RegisterError::ImportAborted { .. } => "import_aborted",
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RegisterError::NotFound { .. } => 404,
            RegisterError::InvalidInput(_)
            | RegisterError::MalformedInput { .. }
            | RegisterError::ValidationError { .. } => 400,
            RegisterError::Storage(_) | RegisterError::ImportAborted { .. } => 500,
        }
    }

    /// 1-based CSV row the error refers to, if any
    pub fn row(&self) -> Option<usize> {
        match self {
            RegisterError::MalformedInput { row, .. }
            | RegisterError::ValidationError { row, .. }
            | RegisterError::ImportAborted { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Rows persisted before an import was aborted
    pub fn committed(&self) -> Option<usize> {
        match self {
            RegisterError::ImportAborted { committed, .. } => Some(*committed),
            _ => None,
        }
    }

    pub(crate) fn malformed(row: usize, reason: impl Into<String>) -> Self {
        RegisterError::MalformedInput {
            row,
            reason: reason.into(),
        }
    }
}

impl From<rusqlite::Error> for RegisterError {
    fn from(err: rusqlite::Error) -> Self {
        RegisterError::Storage(err.to_string())
    }
}
