use anyhow::Result;
use tracing::info;

use super::RunArgs;
use crate::output;

pub async fn execute(file: &str, run: &RunArgs, format: &str) -> Result<()> {
    info!("Validating workbook: {}", file);

    let report = super::validate_file(file, run).await?;

    // Print the validation report
    output::print_workbook_report(&report, format)?;

    if !report.valid() {
        std::process::exit(1);
    }

    Ok(())
}
