use anyhow::{Context, Result};
use sheets_core::Record;
use sheets_io::export_records;
use tracing::info;

use super::RunArgs;
use crate::output;

pub async fn execute(file: &str, run: &RunArgs, output_path: &str, sheet_name: &str) -> Result<()> {
    info!("Exporting accepted rows of {} to {}", file, output_path);

    let report = super::validate_file(file, run).await?;

    let records: Vec<Record> = report
        .sheets
        .iter()
        .flat_map(|(_, sheet)| sheet.valid_rows.iter().cloned())
        .collect();
    let rejected: usize = report.sheets.iter().map(|(_, sheet)| sheet.rejected_rows()).sum();

    let bytes = export_records(&records, sheet_name).context("Failed to export records")?;
    std::fs::write(output_path, bytes)
        .with_context(|| format!("Failed to write export file: {}", output_path))?;

    output::print_success(&format!(
        "Exported {} records to {}",
        records.len(),
        output_path
    ));
    if rejected > 0 {
        output::print_warning(&format!(
            "{} rows failed validation and were not exported",
            rejected
        ));
    }

    Ok(())
}
