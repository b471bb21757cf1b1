//! Date parsing for date columns.
//!
//! Spreadsheets hand dates over in several shapes: native date cells, serial day
//! numbers, and free text typed by whoever filled the sheet. Everything is
//! normalized to a `NaiveDateTime` in the sheet's own wall-clock time.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use sheets_core::CellValue;
use std::sync::LazyLock;

/// Day zero of the 1900 serial date system as spreadsheets count it.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Serial number of 9999-12-31, the last date spreadsheets can represent.
const MAX_SERIAL: f64 = 2_958_465.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// `DD.MM.YY` or `DD.MM.YYYY`
static DOTTED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{2}|\d{4})$").expect("dotted date pattern is valid")
});

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a cell into a date-time.
///
/// Accepts date cells, serial day numbers and text in one of the supported
/// formats. Returns `None` for anything else.
pub fn parse_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Date(d) => Some(*d),
        CellValue::Number(n) => from_serial(*n),
        CellValue::Text(s) => parse_date_str(s),
        CellValue::Bool(_) | CellValue::Empty => None,
    }
}

/// Parses a date string in multiple formats.
///
/// Supports:
/// - RFC 3339 (e.g., "2025-01-26T18:39:26+05:30"), kept in the written offset's wall-clock time
/// - ISO date-time without offset (e.g., "2025-01-26T18:39:26", "2025-01-26 18:39")
/// - Date only (e.g., "2025-01-26", "2025/01/26", "01/26/2025")
/// - Dotted short form (e.g., "26.01.25", "26.01.2025"), two-digit years in 2000-2099
pub fn parse_date_str(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    parse_dotted(input)
}

fn parse_dotted(input: &str) -> Option<NaiveDateTime> {
    let caps = DOTTED_DATE.captures(input)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year_digits = &caps[3];
    let mut year: i32 = year_digits.parse().ok()?;
    if year_digits.len() == 2 {
        year += 2000;
    }

    // Rejects rollovers such as 31.02.25
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.and_time(NaiveTime::MIN))
}

/// Converts a spreadsheet serial day number to a date-time.
///
/// The fractional part is the time of day, rounded to the second.
pub fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }

    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * SECONDS_PER_DAY).round() as i64;
    let epoch = serial_epoch()?;

    epoch
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// Converts a date-time to a spreadsheet serial day number.
pub fn to_serial(value: NaiveDateTime) -> f64 {
    let Some(epoch) = serial_epoch() else {
        return 0.0;
    };
    let elapsed = value.signed_duration_since(epoch);
    elapsed.num_seconds() as f64 / SECONDS_PER_DAY
}

fn serial_epoch() -> Option<NaiveDateTime> {
    let (y, m, d) = SERIAL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d).map(|date| date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_iso_formats() {
        assert_eq!(parse_date_str("2025-01-26"), Some(ymd(2025, 1, 26)));
        assert_eq!(parse_date_str("2025/01/26"), Some(ymd(2025, 1, 26)));
        assert_eq!(parse_date_str("01/26/2025"), Some(ymd(2025, 1, 26)));
        assert_eq!(
            parse_date_str("2025-01-26 18:39:26"),
            NaiveDate::from_ymd_opt(2025, 1, 26)
                .unwrap()
                .and_hms_opt(18, 39, 26)
        );
        assert_eq!(
            parse_date_str("2025-01-26T18:39:26"),
            NaiveDate::from_ymd_opt(2025, 1, 26)
                .unwrap()
                .and_hms_opt(18, 39, 26)
        );
    }

    #[test]
    fn test_parse_rfc3339_keeps_written_wall_clock() {
        assert_eq!(
            parse_date_str("2025-01-31T23:30:00+05:30"),
            NaiveDate::from_ymd_opt(2025, 1, 31)
                .unwrap()
                .and_hms_opt(23, 30, 0)
        );
    }

    #[test]
    fn test_parse_dotted_short_form() {
        assert_eq!(parse_date_str("26.01.25"), Some(ymd(2025, 1, 26)));
        assert_eq!(parse_date_str("5.1.2025"), Some(ymd(2025, 1, 5)));
        assert_eq!(parse_date_str("31.02.25"), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date_str("not a date"), None);
        assert_eq!(parse_date_str("2025-13-01"), None);
        assert_eq!(parse_date_str("   "), None);
        assert_eq!(parse_date(&CellValue::Bool(true)), None);
    }

    #[test]
    fn test_serial_dates() {
        assert_eq!(from_serial(45683.0), Some(ymd(2025, 1, 26)));
        assert_eq!(from_serial(1.0), Some(ymd(1899, 12, 31)));
        assert_eq!(
            from_serial(45683.5),
            NaiveDate::from_ymd_opt(2025, 1, 26)
                .unwrap()
                .and_hms_opt(12, 0, 0)
        );
        assert_eq!(from_serial(-1.0), None);
        assert_eq!(from_serial(f64::NAN), None);
        assert_eq!(to_serial(ymd(2025, 1, 26)), 45683.0);
    }

    #[test]
    fn test_parse_date_cell_variants() {
        assert_eq!(
            parse_date(&CellValue::Date(ymd(2025, 1, 2))),
            Some(ymd(2025, 1, 2))
        );
        assert_eq!(parse_date(&CellValue::Number(45683.0)), Some(ymd(2025, 1, 26)));
        assert_eq!(parse_date(&"26.01.25".into()), Some(ymd(2025, 1, 26)));
    }
}
