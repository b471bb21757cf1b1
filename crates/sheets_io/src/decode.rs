//! Workbook decoding.
//!
//! Every sheet's first row is its header. Following rows become [`Row`]s keyed by
//! header text; empty cells produce no key and rows without any value are
//! skipped.

use crate::{IoError, Result, WorkbookFormat};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use sheets_core::{CellValue, Row};
use sheets_validator::{dates, Sheet, Workbook};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Name given to the only sheet of a delimited file.
const DELIMITED_SHEET: &str = "Sheet1";

/// Decodes workbook bytes in the given format.
///
/// # Errors
///
/// Returns `IoError::Unreadable` if the bytes are not a workbook of that format.
pub fn decode_workbook(bytes: &[u8], format: WorkbookFormat) -> Result<Workbook> {
    let workbook = if format.is_delimited() {
        decode_delimited(bytes)?
    } else {
        decode_spreadsheet(bytes)?
    };

    debug!(
        format = %format,
        sheets = workbook.sheets().len(),
        "Decoded workbook"
    );
    Ok(workbook)
}

/// Reads and decodes a workbook file, detecting its format from the extension.
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let format = WorkbookFormat::detect(path)?;
    let bytes = std::fs::read(path)
        .map_err(|e| IoError::Unreadable(format!("{}: {}", path.display(), e)))?;
    decode_workbook(&bytes, format)
}

fn decode_spreadsheet(bytes: &[u8]) -> Result<Workbook> {
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| IoError::Unreadable(e.to_string()))?;
    let sheet_names = sheets.sheet_names().to_owned();

    let mut workbook = Workbook::new();
    for sheet_name in sheet_names {
        let range = sheets
            .worksheet_range(&sheet_name)
            .map_err(|e| IoError::Unreadable(format!("sheet '{}': {}", sheet_name, e)))?;

        let grid = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>());
        workbook.add_sheet(sheet_from_grid(&sheet_name, grid));
    }

    Ok(workbook)
}

fn convert_cell(value: &Data) -> CellValue {
    match value {
        Data::Empty => CellValue::Empty,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => match dates::from_serial(dt.as_f64()) {
            Some(d) => CellValue::Date(d),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match dates::parse_date_str(s) {
            Some(d) => CellValue::Date(d),
            None => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn decode_delimited(bytes: &[u8]) -> Result<Workbook> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IoError::Unreadable(e.to_string()))?;
        let convert: fn(&str) -> CellValue = if index == 0 { header_field } else { convert_field };
        grid.push(record.iter().map(convert).collect::<Vec<_>>());
    }

    Ok(std::iter::once(sheet_from_grid(DELIMITED_SHEET, grid)).collect())
}

/// Header text is kept verbatim so column names match exactly.
fn header_field(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}

fn convert_field(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Empty;
    }
    if field.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if field.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }
    match field.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(field.to_string()),
    }
}

/// Builds a sheet from a grid of converted cells; the first row is the header.
fn sheet_from_grid<I>(name: &str, grid: I) -> Sheet
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let mut grid = grid.into_iter();
    let Some(header_row) = grid.next() else {
        return Sheet::new(name);
    };
    let headers = header_names(name, &header_row);

    let mut sheet = Sheet::new(name);
    for cells in grid {
        let row: Row = cells
            .into_iter()
            .zip(headers.iter())
            .filter_map(|(value, header)| {
                let header = header.as_ref()?;
                (!value.is_missing()).then(|| (header.clone(), value))
            })
            .collect();

        if !row.is_empty() {
            sheet.add_row(row);
        }
    }

    sheet
}

/// Resolves header text per column; empty headers are `None`.
///
/// Repeated headers get `_1`, `_2` ... suffixes in order of appearance.
fn header_names(sheet: &str, header_row: &[CellValue]) -> Vec<Option<String>> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header_row
        .iter()
        .map(|cell| {
            if cell.is_missing() {
                return None;
            }
            let text = cell.to_string();
            let count = seen.entry(text.clone()).or_insert(0);
            let name = if *count == 0 {
                text.clone()
            } else {
                let renamed = format!("{}_{}", text, count);
                warn!(sheet = sheet, header = %text, renamed = %renamed, "Duplicate header");
                renamed
            };
            *count += 1;
            Some(name)
        })
        .collect()
}
