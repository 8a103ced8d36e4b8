//! Column layout for risk register CSV files.
//!
//! Every row, header included, must carry exactly [`COLUMN_COUNT`] fields.
//! Positions 0-11 map to record fields through [`IMPORT_COLUMNS`]; position 12
//! is a reserved trailing column: it must be present but its content is never
//! read, so a file carries 13 columns while only 12 fields are consumed.
//!
//! ```text
//!  0 item_name               7 responsible_person
//!  1 risk_id                 8 responsible_department
//!  2 risk_description        9 target_completion_date
//!  3 likelihood     (int)   10 status
//!  4 impact         (int)   11 stakeholders
//!  5 risk_score     (int)   12 (reserved)
//!  6 mitigation_actions
//! ```

use crate::register::{RegisterError, RiskRecord};

/// Fields required per CSV row
pub const COLUMN_COUNT: usize = 13;

/// A record field that can be filled from one CSV column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskField {
    ItemName,
    RiskId,
    RiskDescription,
    Likelihood,
    Impact,
    RiskScore,
    MitigationActions,
    ResponsiblePerson,
    ResponsibleDepartment,
    TargetCompletionDate,
    Status,
    Stakeholders,
}

/// Column position -> field; index in this array is the CSV column index
pub const IMPORT_COLUMNS: [RiskField; 12] = [
    RiskField::ItemName,
    RiskField::RiskId,
    RiskField::RiskDescription,
    RiskField::Likelihood,
    RiskField::Impact,
    RiskField::RiskScore,
    RiskField::MitigationActions,
    RiskField::ResponsiblePerson,
    RiskField::ResponsibleDepartment,
    RiskField::TargetCompletionDate,
    RiskField::Status,
    RiskField::Stakeholders,
];

impl RiskField {
    /// Human-readable name used in validation messages
    pub fn label(&self) -> &'static str {
        match self {
            RiskField::ItemName => "item name",
            RiskField::RiskId => "risk id",
            RiskField::RiskDescription => "risk description",
            RiskField::Likelihood => "likelihood",
            RiskField::Impact => "impact",
            RiskField::RiskScore => "risk score",
            RiskField::MitigationActions => "mitigation actions",
            RiskField::ResponsiblePerson => "responsible person",
            RiskField::ResponsibleDepartment => "responsible department",
            RiskField::TargetCompletionDate => "target completion date",
            RiskField::Status => "status",
            RiskField::Stakeholders => "stakeholders",
        }
    }

    #[cfg(test)]
    fn is_integer(&self) -> bool {
        matches!(
            self,
            RiskField::Likelihood | RiskField::Impact | RiskField::RiskScore
        )
    }

    /// Store a raw CSV value into `record`, parsing integer columns.
    ///
    /// `row` is the 1-based file row, used only for error reporting.
    pub fn apply(&self, record: &mut RiskRecord, raw: &str, row: usize) -> Result<(), RegisterError> {
        let text = || raw.to_string();
        match self {
            RiskField::ItemName => record.item_name = text(),
            RiskField::RiskId => record.risk_id = text(),
            RiskField::RiskDescription => record.risk_description = text(),
            RiskField::Likelihood => record.likelihood = self.parse_int(raw, row)?,
            RiskField::Impact => record.impact = self.parse_int(raw, row)?,
            RiskField::RiskScore => record.risk_score = self.parse_int(raw, row)?,
            RiskField::MitigationActions => record.mitigation_actions = text(),
            RiskField::ResponsiblePerson => record.responsible_person = text(),
            RiskField::ResponsibleDepartment => record.responsible_department = text(),
            RiskField::TargetCompletionDate => record.target_completion_date = text(),
            RiskField::Status => record.status = text(),
            RiskField::Stakeholders => record.stakeholders = text(),
        }
        Ok(())
    }

    /// Optional sign and ASCII digits only; whitespace is not trimmed
    fn parse_int(&self, raw: &str, row: usize) -> Result<i64, RegisterError> {
        raw.parse::<i64>()
            .map_err(|_| RegisterError::ValidationError {
                row,
                field: self.label(),
                value: raw.to_string(),
            })
    }
}

/// Build a record from one data row; `fields` must already hold [`COLUMN_COUNT`] values
pub fn record_from_fields<'a>(
    fields: impl IntoIterator<Item = &'a str>,
    row: usize,
) -> Result<RiskRecord, RegisterError> {
    let mut record = RiskRecord::default();
    // zip stops at the last mapped column, leaving the reserved one untouched
    for (field, raw) in IMPORT_COLUMNS.iter().zip(fields) {
        field.apply(&mut record, raw, row)?;
    }
    Ok(record)
}
