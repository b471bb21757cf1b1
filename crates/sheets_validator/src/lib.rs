//! # Sheets Validator
//!
//! Validation engine for spreadsheet rule sets. This crate checks decoded rows
//! against the rule set registered for their sheet and produces:
//!
//! - Row errors for missing required values, type mismatches, lower bounds and
//!   rejected predicates
//! - Transformed output records for rows that pass every rule
//!
//! The engine is a pure function of the rows, the rule set and the evaluation
//! instant carried by [`ValidationContext`](sheets_core::ValidationContext).
//!
//! ## Example
//!
//! ```rust
//! use sheets_validator::SheetValidator;
//! use sheets_core::{CellValue, Registry, Row, ValidationContext};
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! let validator = SheetValidator::new(Arc::new(Registry::builtin()));
//! let ctx = ValidationContext::on(NaiveDate::from_ymd_opt(2025, 1, 26).unwrap());
//!
//! let row = Row::from([
//!     ("Name".to_string(), CellValue::from("John")),
//!     ("Amount".to_string(), CellValue::from(1500.0)),
//!     ("Date".to_string(), CellValue::from("26.01.25")),
//!     ("Verified".to_string(), CellValue::from("Yes")),
//! ]);
//!
//! let report = validator.validate_sheet(&[row], "default", &ctx);
//!
//! if report.valid {
//!     println!("{} rows accepted", report.valid_rows.len());
//! } else {
//!     for error in &report.errors {
//!         println!("{}", error);
//!     }
//! }
//! ```

mod cell;
mod dataset;
pub mod dates;
mod engine;
mod error;
mod transform;

pub use cell::*;
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use transform::*;
