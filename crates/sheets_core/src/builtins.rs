//! Built-in predicates and transforms.
//!
//! Rule files can only name functions, so everything a configuration may refer to
//! is registered here under a stable name.

use crate::{CellValue, ParsedValue, Predicate, Transform};
use chrono::{Datelike, Months};

/// Date falls in the same calendar month and year as the evaluation instant.
pub const CURRENT_MONTH: &str = "current_month";

/// Date is not older than one calendar month before the evaluation instant.
pub const SINCE_PREVIOUS_MONTH: &str = "since_previous_month";

/// Yes/No text to boolean.
pub const YES_NO: &str = "yes_no";

/// Surrounding whitespace removed from text.
pub const TRIM: &str = "trim";

/// Names of all built-in predicates.
pub const PREDICATES: &[&str] = &[CURRENT_MONTH, SINCE_PREVIOUS_MONTH];

/// Names of all built-in transforms.
pub const TRANSFORMS: &[&str] = &[YES_NO, TRIM];

/// Looks up a built-in predicate by name.
pub fn predicate(name: &str) -> Option<Predicate> {
    match name {
        CURRENT_MONTH => Some(current_month()),
        SINCE_PREVIOUS_MONTH => Some(since_previous_month()),
        _ => None,
    }
}

/// Looks up a built-in transform by name.
pub fn transform(name: &str) -> Option<Transform> {
    match name {
        YES_NO => Some(yes_no()),
        TRIM => Some(trim()),
        _ => None,
    }
}

/// Accepts dates in the evaluation instant's month and year.
pub fn current_month() -> Predicate {
    Predicate::new(CURRENT_MONTH, |value, now| match value.as_date() {
        Some(date) => date.month() == now.month() && date.year() == now.year(),
        None => false,
    })
}

/// Accepts dates at or after the evaluation instant minus one calendar month.
///
/// Compared as full timestamps, so the same day one month back only passes from
/// the evaluation instant's time of day onwards. The month step is clamped to the
/// end of shorter months, so on March 31st the floor falls on February 28th (or 29th).
pub fn since_previous_month() -> Predicate {
    Predicate::new(SINCE_PREVIOUS_MONTH, |value, now| {
        let Some(date) = value.as_date() else {
            return false;
        };
        match now.checked_sub_months(Months::new(1)) {
            Some(floor) => date >= floor,
            None => false,
        }
    })
}

/// Normalizes Yes/No answers to booleans.
///
/// Text becomes `true` only when it reads "yes" in any letter case. Native booleans
/// pass through and everything else becomes `false`.
pub fn yes_no() -> Transform {
    Transform::new(YES_NO, |value| match value {
        CellValue::Text(s) => CellValue::Bool(s.to_lowercase() == "yes"),
        CellValue::Bool(b) => CellValue::Bool(*b),
        _ => CellValue::Bool(false),
    })
}

/// Strips leading and trailing whitespace from text values.
pub fn trim() -> Transform {
    Transform::new(TRIM, |value| match value {
        CellValue::Text(s) => CellValue::Text(s.trim().to_string()),
        other => other.clone(),
    })
}
