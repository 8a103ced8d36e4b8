//! Import command implementation

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

use riskreg::register::{RiskStore, parse_rows};

use super::open_register;

/// Import (or with `dry_run`, only validate) a CSV file
pub fn import_command(
    work_dir: &Path,
    config_path: Option<&Path>,
    file: &Path,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let input = File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;

    if dry_run {
        let rows = parse_rows(input).with_context(|| format!("Invalid CSV: {}", file.display()))?;
        println!("{} rows valid, nothing imported (dry run)", rows.len());
        return Ok(());
    }

    let (_, register) = open_register(work_dir, config_path)?;
    let created = match register.importer().import(input) {
        Ok(created) => created,
        Err(e) => {
            if let Some(committed) = e.committed() {
                eprintln!("{} rows were committed before the failure", committed);
            }
            return Err(e).with_context(|| format!("Import of {} failed", file.display()));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        println!(
            "Imported {} risks ({} total in register)",
            created.len(),
            register.repository().list()?.len()
        );
        for record in &created {
            println!("  #{} {} [{}]", record.id, record.item_name, record.risk_id);
        }
    }

    Ok(())
}
