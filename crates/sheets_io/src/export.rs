//! Export of accepted records to `.xlsx`.

use crate::{IoError, Result};
use chrono::NaiveTime;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use sheets_core::{CellValue, Record};
use sheets_validator::dates;
use tracing::debug;

/// Worksheet name used when the caller does not pick one.
pub const DEFAULT_EXPORT_SHEET: &str = "Validated Data";

const HEADER_FILL: u32 = 0xCCCCCC;
const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Writes records to a single-sheet `.xlsx` workbook and returns its bytes.
///
/// The header row is the union of record keys in order of first appearance,
/// bold on a grey fill. Dates are written as serial numbers with a date format so
/// spreadsheet applications display and sort them as dates.
///
/// # Errors
///
/// Returns `IoError::Export` if the sheet name is invalid or the workbook cannot
/// be written.
pub fn export_records(records: &[Record], sheet_name: &str) -> Result<Vec<u8>> {
    let headers = collect_headers(records);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL));
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, header.as_str(), &header_format)?;
    }

    let formats = CellFormats::new();
    for (index, record) in records.iter().enumerate() {
        let row = row_index(index + 1)?;
        for (col, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(header) {
                write_cell(worksheet, row, column_index(col)?, value, &formats)?;
            }
        }
    }
    worksheet.autofit();

    let bytes = workbook.save_to_buffer()?;
    debug!(
        sheet = sheet_name,
        records = records.len(),
        columns = headers.len(),
        bytes = bytes.len(),
        "Exported records"
    );
    Ok(bytes)
}

struct CellFormats {
    date: Format,
    date_time: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            date: Format::new().set_num_format(DATE_FORMAT),
            date_time: Format::new().set_num_format(DATE_TIME_FORMAT),
        }
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    formats: &CellFormats,
) -> Result<()> {
    match value {
        CellValue::Empty => {}
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Date(d) => {
            let format = if d.time() == NaiveTime::MIN {
                &formats.date
            } else {
                &formats.date_time
            };
            worksheet.write_number_with_format(row, col, dates::to_serial(*d), format)?;
        }
    }
    Ok(())
}

fn collect_headers(records: &[Record]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

fn row_index(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| IoError::Export(format!("row {} out of range", index)))
}

fn column_index(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| IoError::Export(format!("column {} out of range", index)))
}
