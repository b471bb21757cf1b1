//! Decoded sheets and workbooks.
//!
//! This module provides the in-memory shape of spreadsheet data handed to the
//! engine: named sheets of header-keyed rows, grouped into a workbook.

use sheets_core::Row;

/// A named sheet of decoded rows.
///
/// Rows exclude the header line; the first row is spreadsheet line 2.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Row>,
}

impl Sheet {
    /// Creates a new empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Creates a new sheet from rows.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns the sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows in the sheet.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the rows in sheet order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Gets a specific row by index.
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Adds a row to the sheet.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Creates a new empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sheet.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Returns the sheets in workbook order.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Consumes the workbook, returning its sheets.
    pub fn into_sheets(self) -> Vec<Sheet> {
        self.sheets
    }

    /// Gets a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Returns the sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Returns true if the workbook has no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl FromIterator<Sheet> for Workbook {
    fn from_iter<T: IntoIterator<Item = Sheet>>(iter: T) -> Self {
        Self {
            sheets: iter.into_iter().collect(),
        }
    }
}
