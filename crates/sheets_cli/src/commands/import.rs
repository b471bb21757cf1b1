use anyhow::{Context, Result};
use sheets_io::{import_records, IoError, JsonLinesSink};
use std::fs::OpenOptions;
use std::io::BufWriter;
use tracing::info;

use super::RunArgs;
use crate::output;

pub async fn execute(file: &str, run: &RunArgs, store: &str, batch_size: usize) -> Result<()> {
    info!("Importing accepted rows of {} into {}", file, store);

    let report = super::validate_file(file, run).await?;
    if report.sheets.iter().all(|(_, sheet)| sheet.valid_rows.is_empty()) {
        return Err(IoError::NothingToImport.into());
    }

    let store_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(store)
        .with_context(|| format!("Failed to open record store: {}", store))?;
    let mut sink = JsonLinesSink::new(BufWriter::new(store_file));

    let mut imported = 0;
    let mut rejected = 0;
    for (sheet_name, sheet) in &report.sheets {
        rejected += sheet.rejected_rows();
        if sheet.valid_rows.is_empty() {
            continue;
        }
        let summary = import_records(&mut sink, &sheet.valid_rows, sheet_name, batch_size)
            .with_context(|| format!("Failed to import sheet '{}'", sheet_name))?;
        imported += summary.imported;
    }

    output::print_success(&format!("Successfully imported {} records", imported));
    if rejected > 0 {
        output::print_warning(&format!(
            "{} rows failed validation and were not imported",
            rejected
        ));
    }

    Ok(())
}
