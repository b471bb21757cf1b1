//! Cell values, rows and output records.
//!
//! A decoded spreadsheet is handed to the engine as a sequence of [`Row`]s, each
//! mapping a header string to the raw [`CellValue`] found under it. Accepted rows
//! come back as [`Record`]s keyed by the destination field names of the rule set.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Largest integer an `f64` represents exactly; whole numbers below it serialize as integers.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A raw scalar read from a spreadsheet cell.
///
/// Deserializes from plain JSON scalars (`null`, booleans, numbers, strings), which
/// makes JSON row dumps usable as engine input without a spreadsheet decoder.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Blank cell
    #[default]
    Empty,
    /// Boolean cell (`TRUE`/`FALSE` in a spreadsheet)
    Bool(bool),
    /// Numeric cell
    Number(f64),
    /// Text cell
    Text(String),
    /// Date or date-time cell
    Date(NaiveDateTime),
}

impl CellValue {
    /// Returns true if the cell counts as missing.
    ///
    /// Both a blank cell and an empty string are missing. Whitespace-only text is a
    /// present value.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Date(d) => d.serialize(serializer),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Date(d) if d.time() == chrono::NaiveTime::MIN => {
                write!(f, "{}", d.date())
            }
            CellValue::Date(d) => write!(f, "{}", d),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d.and_time(chrono::NaiveTime::MIN))
    }
}

/// A cell value after its column type accepted it.
///
/// This is what rule predicates see: numbers are numbers even when the sheet
/// stored them as text, dates are parsed, booleans are normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Bool(bool),
}

impl ParsedValue {
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            ParsedValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// A single spreadsheet row keyed by header text.
pub type Row = HashMap<String, CellValue>;

/// A transformed output record keyed by destination field name.
///
/// Ordered so that serialized reports are stable across calls.
pub type Record = BTreeMap<String, CellValue>;
