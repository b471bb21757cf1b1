//! Main validation engine.
//!
//! This module provides the `SheetValidator` that resolves a rule set for a sheet,
//! checks every row against it and collects row errors and transformed records.

use crate::{transform_row, CellError, CellValidator, Workbook};
use sheets_core::{
    Registry, Row, RowError, RuleSet, SheetReport, SheetValidation, ValidationContext,
    WorkbookReport,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Number of header lines above the first data row.
const HEADER_ROWS: usize = 1;

/// Validation engine for spreadsheet rows.
///
/// Holds a shared [`Registry`] and is otherwise stateless, so one validator can be
/// cloned into concurrent tasks.
///
/// # Example
///
/// ```rust
/// use sheets_validator::SheetValidator;
/// use sheets_core::{CellValue, Registry, Row, ValidationContext};
/// use chrono::NaiveDate;
/// use std::sync::Arc;
///
/// let validator = SheetValidator::new(Arc::new(Registry::builtin()));
/// let ctx = ValidationContext::on(NaiveDate::from_ymd_opt(2025, 1, 26).unwrap());
///
/// let row = Row::from([("Name".to_string(), CellValue::from(""))]);
/// let report = validator.validate_sheet(&[row], "default", &ctx);
///
/// assert!(!report.valid);
/// assert_eq!(report.errors[0].to_string(), "Row 2: Name is required");
/// ```
#[derive(Debug, Clone)]
pub struct SheetValidator {
    registry: Arc<Registry>,
    cells: CellValidator,
}

impl SheetValidator {
    /// Creates a new validator over `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            cells: CellValidator::new(),
        }
    }

    /// Returns the registry rule sets are resolved from.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validates rows of the sheet identified by `sheet`.
    ///
    /// Unknown identifiers fall back to the `default` rule set.
    pub fn validate_sheet(&self, rows: &[Row], sheet: &str, ctx: &ValidationContext) -> SheetReport {
        let rules = self.registry.resolve(sheet);
        debug!(
            sheet = sheet,
            rule_set = rules.name(),
            rows = rows.len(),
            "Validating sheet"
        );

        let report = self.validate_rows(rows, rules, ctx);

        info!(
            sheet = sheet,
            rows = report.total_rows,
            errors = report.errors.len(),
            accepted = report.valid_rows.len(),
            "Sheet validated"
        );
        report
    }

    /// Validates rows against an explicit rule set.
    pub fn validate_rows(&self, rows: &[Row], rules: &RuleSet, ctx: &ValidationContext) -> SheetReport {
        let mut report = SheetReport::new(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let line = index + 1 + HEADER_ROWS;
            let errors = self.validate_row(row, rules, ctx);

            if errors.is_empty() {
                report.accept(transform_row(row, rules));
            } else {
                report.reject(
                    errors
                        .into_iter()
                        .map(|e| RowError::new(line, e.column(), e.to_string())),
                );
            }
        }

        report
    }

    /// Validates every sheet of a workbook under its own name.
    pub fn validate_workbook(&self, workbook: &Workbook, ctx: &ValidationContext) -> WorkbookReport {
        let mut report = WorkbookReport::new();
        for sheet in workbook.sheets() {
            report.push(sheet.name(), self.validate_sheet(sheet.rows(), sheet.name(), ctx));
        }
        report
    }

    /// Checks one row, returning its errors in column declaration order.
    fn validate_row(&self, row: &Row, rules: &RuleSet, ctx: &ValidationContext) -> Vec<CellError> {
        let mut errors = Vec::new();

        for (column, rule) in rules.iter() {
            match row.get(column).filter(|v| !v.is_missing()) {
                None if rule.required => errors.push(CellError::required(column)),
                None => {}
                Some(value) => {
                    if let Err(e) = self.cells.validate(column, rule, value, ctx) {
                        errors.push(e);
                    }
                }
            }
        }

        errors
    }
}

impl SheetValidation for SheetValidator {
    fn validate_sheet(&self, rows: &[Row], sheet: &str, ctx: &ValidationContext) -> SheetReport {
        SheetValidator::validate_sheet(self, rows, sheet, ctx)
    }
}
