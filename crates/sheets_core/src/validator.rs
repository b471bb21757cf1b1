//! Validation traits and report types.
//!
//! This module defines the interface between callers and sheet validators: the
//! context a validation runs in, the per-sheet report it produces and the trait
//! validator implementations provide.

use crate::{Record, Row};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Core trait for validating decoded sheets.
///
/// Implementations are pure: the same rows, sheet identifier and context always
/// produce the same report.
///
/// # Example
///
/// ```rust
/// use sheets_core::{Row, SheetReport, SheetValidation, ValidationContext};
///
/// struct AcceptAll;
///
/// impl SheetValidation for AcceptAll {
///     fn validate_sheet(&self, rows: &[Row], _sheet: &str, _ctx: &ValidationContext) -> SheetReport {
///         let mut report = SheetReport::new(rows.len());
///         for _ in rows {
///             report.accept(Default::default());
///         }
///         report
///     }
/// }
/// ```
pub trait SheetValidation: Send + Sync {
    /// Validates the rows of one sheet.
    ///
    /// # Arguments
    ///
    /// * `rows` - Decoded rows in sheet order, header excluded
    /// * `sheet` - Sheet identifier used to select the rule set
    /// * `ctx` - Evaluation context
    fn validate_sheet(&self, rows: &[Row], sheet: &str, ctx: &ValidationContext) -> SheetReport;
}

/// Context for validation operations.
///
/// Carries the instant date rules are evaluated against. Validators never read the
/// system clock; the caller decides what "now" is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Evaluation instant for date predicates
    pub now: NaiveDateTime,
}

impl ValidationContext {
    /// Creates a context evaluated at `now`.
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Creates a context evaluated at midnight of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::at(date.and_time(NaiveTime::MIN))
    }
}

/// A row-scoped description of why a cell failed its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// Spreadsheet line number (1-based, header on line 1)
    pub row: usize,

    /// Column header
    pub column: String,

    /// Human-readable message
    pub message: String,
}

impl RowError {
    /// Creates a new row error.
    pub fn new(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Report of validating one sheet.
///
/// Every row lands either in `valid_rows` (transformed) or contributes one or more
/// entries to `errors`, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetReport {
    /// Whether no row failed
    pub valid: bool,

    /// Errors in row order, then column declaration order
    pub errors: Vec<RowError>,

    /// Transformed records of accepted rows, in row order
    pub valid_rows: Vec<Record>,

    /// Number of rows examined
    pub total_rows: usize,
}

impl SheetReport {
    /// Creates an empty report for `total_rows` rows.
    pub fn new(total_rows: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            valid_rows: Vec::new(),
            total_rows,
        }
    }

    /// Records the errors of a rejected row.
    pub fn reject(&mut self, errors: impl IntoIterator<Item = RowError>) {
        self.errors.extend(errors);
        self.valid = self.errors.is_empty();
    }

    /// Records the output of an accepted row.
    pub fn accept(&mut self, record: Record) {
        self.valid_rows.push(record);
    }

    /// Returns the number of rows that produced at least one error.
    pub fn rejected_rows(&self) -> usize {
        self.total_rows - self.valid_rows.len()
    }
}

/// Reports for every sheet of a workbook, in workbook order.
///
/// Serializes as a JSON object keyed by sheet name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookReport {
    /// `(sheet name, report)` pairs
    pub sheets: Vec<(String, SheetReport)>,
}

impl WorkbookReport {
    /// Creates an empty workbook report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the report of one sheet.
    pub fn push(&mut self, sheet: impl Into<String>, report: SheetReport) {
        self.sheets.push((sheet.into(), report));
    }

    /// Returns the report of a sheet by name.
    pub fn get(&self, sheet: &str) -> Option<&SheetReport> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, report)| report)
    }

    /// Returns true if every sheet is valid.
    pub fn valid(&self) -> bool {
        self.sheets.iter().all(|(_, report)| report.valid)
    }

    /// Returns the total number of row errors across sheets.
    pub fn error_count(&self) -> usize {
        self.sheets.iter().map(|(_, r)| r.errors.len()).sum()
    }
}

impl Serialize for WorkbookReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for (sheet, report) in &self.sheets {
            map.serialize_entry(sheet, report)?;
        }
        map.end()
    }
}
