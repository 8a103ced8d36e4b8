//! List command implementation

use anyhow::Result;
use std::path::Path;

use riskreg::register::RiskStore;

use super::open_register;

/// Print every stored risk
pub fn list_command(work_dir: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let (_, register) = open_register(work_dir, config_path)?;
    let records = register.repository().list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No risks found.");
        return Ok(());
    }

    println!("Risks ({}):\n", records.len());

    for record in &records {
        println!(
            "  #{} [{}] {} - {} (L{} x I{} = {})",
            record.id,
            record.status,
            record.risk_id,
            record.item_name,
            record.likelihood,
            record.impact,
            record.risk_score
        );

        if !record.responsible_person.is_empty() {
            println!(
                "    Owner: {} ({})",
                record.responsible_person, record.responsible_department
            );
        }

        if !record.target_completion_date.is_empty() {
            println!("    Due: {}", record.target_completion_date);
        }
    }

    Ok(())
}
