pub mod export;
pub mod import;
pub mod rules;
pub mod validate;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use sheets_core::{Registry, ValidationContext, WorkbookReport};
use sheets_io::read_workbook;
use sheets_validator::{dates, SheetValidator};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Options shared by every command that validates a workbook.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Rule file (YAML or TOML); built-in rules when omitted
    #[arg(short, long)]
    pub rules: Option<String>,

    /// Only validate the sheet with this name
    #[arg(long)]
    pub sheet: Option<String>,

    /// Evaluation date for date rules, e.g. 2025-01-26 (defaults to now)
    #[arg(long)]
    pub now: Option<String>,
}

/// Loads the rule registry from a file, or the built-in rules.
pub fn load_registry(rules: Option<&str>) -> Result<Registry> {
    match rules {
        Some(path) => {
            info!("Loading rules: {}", path);
            sheets_parser::load_registry(Path::new(path))
                .with_context(|| format!("Failed to load rule file: {}", path))
        }
        None => Ok(Registry::builtin()),
    }
}

/// Builds the validation context from `--now`, falling back to the local clock.
pub fn validation_context(now: Option<&str>) -> Result<ValidationContext> {
    let now = match now {
        Some(value) => dates::parse_date_str(value)
            .ok_or_else(|| anyhow!("Invalid --now value: {}", value))?,
        None => chrono::Local::now().naive_local(),
    };
    Ok(ValidationContext::at(now))
}

/// Decodes a workbook and validates its sheets in parallel.
///
/// Reports are returned in workbook order regardless of completion order.
pub async fn validate_file(file: &str, run: &RunArgs) -> Result<WorkbookReport> {
    let registry = Arc::new(load_registry(run.rules.as_deref())?);
    let ctx = validation_context(run.now.as_deref())?;

    let workbook = read_workbook(Path::new(file))
        .with_context(|| format!("Error processing file: {}", file))?;

    let mut sheets = workbook.into_sheets();
    if let Some(name) = &run.sheet {
        sheets.retain(|sheet| sheet.name() == name.as_str());
        if sheets.is_empty() {
            bail!("Sheet '{}' not found in {}", name, file);
        }
    }
    if sheets.iter().all(|sheet| sheet.is_empty()) {
        bail!("Excel file is empty: {}", file);
    }

    let validator = SheetValidator::new(registry);
    let handles: Vec<_> = sheets
        .into_iter()
        .map(|sheet| {
            let validator = validator.clone();
            tokio::task::spawn_blocking(move || {
                let report = validator.validate_sheet(sheet.rows(), sheet.name(), &ctx);
                (sheet.name().to_string(), report)
            })
        })
        .collect();

    let mut report = WorkbookReport::new();
    for handle in handles {
        let (name, sheet_report) = handle.await.context("Sheet validation task failed")?;
        debug!(sheet = %name, valid = sheet_report.valid, "Collected sheet report");
        report.push(name, sheet_report);
    }

    Ok(report)
}
