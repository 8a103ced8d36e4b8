//! CSV parsing and row validation

use std::io::Read;

use csv::{Position, ReaderBuilder, StringRecord};

use super::columns::{COLUMN_COUNT, record_from_fields};
use crate::register::{RegisterError, RiskRecord};

/// A validated data row and the 1-based input line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub row: usize,
    pub record: RiskRecord,
}

/// Parse `input` and validate every data row without touching any store.
///
/// Row numbers are the 1-based input line on which a record starts, so the
/// header is row 1 and blank lines still advance the count. A quoted field
/// spanning lines reports the line it opens on. Column counts are checked for
/// the whole file before any field is converted, so a short row further down
/// wins over an integer error near the top.
pub fn parse_rows<R: Read>(mut input: R) -> Result<Vec<ParsedRow>, RegisterError> {
    let mut bytes = Vec::new();
    if let Err(e) = input.read_to_end(&mut bytes) {
        let line = bytes.iter().filter(|&&b| b == b'\n').count() + 1;
        return Err(RegisterError::malformed(line, e.to_string()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b',')
        .from_reader(bytes.as_slice());

    let mut raw_rows: Vec<(usize, StringRecord)> = Vec::new();
    loop {
        let mut record = StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                let line = match e.position() {
                    Some(pos) => record_line(&bytes, pos),
                    None => reader.position().line() as usize,
                };
                return Err(RegisterError::malformed(line, e.to_string()));
            }
        }

        let row = match record.position() {
            Some(pos) => record_line(&bytes, pos),
            None => reader.position().line() as usize,
        };
        if record.len() != COLUMN_COUNT {
            return Err(RegisterError::malformed(
                row,
                format!("expected {} columns, found {}", COLUMN_COUNT, record.len()),
            ));
        }
        raw_rows.push((row, record));
    }

    // The first record is the header, whatever it contains
    raw_rows
        .iter()
        .skip(1)
        .map(|(row, fields)| -> Result<ParsedRow, RegisterError> {
            Ok(ParsedRow {
                row: *row,
                record: record_from_fields(fields.iter(), *row)?,
            })
        })
        .collect()
}

/// Line on which the record at `pos` starts.
///
/// The reader records a position before discarding the blank lines that
/// precede a record, so those line breaks are counted here.
fn record_line(bytes: &[u8], pos: &Position) -> usize {
    let skipped = bytes
        .get(pos.byte() as usize..)
        .unwrap_or_default()
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .filter(|&&b| b == b'\n')
        .count();
    pos.line() as usize + skipped
}
