//! Tests to verify correct handling of missing values across column types.
//!
//! A value is missing when the column is absent from the row, the cell is empty or
//! it holds an empty string. Missing values:
//! - Fail required columns with "<column> is required" and skip the type check
//! - Are skipped silently for optional columns
//! - Never produce a key in the output record

use chrono::NaiveDate;
use sheets_core::{
    CellValue, ColumnRuleBuilder, ColumnType, Registry, Row, RuleSet, RuleSetBuilder,
    ValidationContext,
};
use sheets_validator::SheetValidator;
use std::sync::Arc;

fn ctx() -> ValidationContext {
    ValidationContext::on(NaiveDate::from_ymd_opt(2025, 1, 26).unwrap())
}

fn validator() -> SheetValidator {
    SheetValidator::new(Arc::new(Registry::builtin()))
}

fn rules() -> RuleSet {
    RuleSetBuilder::new("default")
        .column(
            "Code",
            ColumnRuleBuilder::new(ColumnType::String, "code")
                .required(true)
                .build(),
        )
        .column(
            "Quantity",
            ColumnRuleBuilder::new(ColumnType::Number, "quantity")
                .min(1.0)
                .build(),
        )
        .column(
            "Shipped",
            ColumnRuleBuilder::new(ColumnType::Date, "shipped").build(),
        )
        .column(
            "Paid",
            ColumnRuleBuilder::new(ColumnType::Boolean, "paid").build(),
        )
        .build()
}

fn row(cells: &[(&str, CellValue)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_every_missing_shape_fails_required_column() {
    let rows = vec![
        row(&[]),
        row(&[("Code", CellValue::Empty)]),
        row(&[("Code", CellValue::from(""))]),
    ];

    let report = validator().validate_rows(&rows, &rules(), &ctx());

    assert!(!report.valid);
    assert_eq!(report.errors.len(), 3);
    for (i, error) in report.errors.iter().enumerate() {
        assert_eq!(error.row, i + 2);
        assert_eq!(error.column, "Code");
        assert_eq!(error.message, "Code is required");
    }
    assert!(report.valid_rows.is_empty());
}

#[test]
fn test_missing_optional_columns_skip_type_checks() {
    let rows = vec![row(&[
        ("Code", CellValue::from("A-1")),
        ("Quantity", CellValue::from("")),
        ("Shipped", CellValue::Empty),
    ])];

    let report = validator().validate_rows(&rows, &rules(), &ctx());

    assert!(report.valid, "errors: {:?}", report.errors);
    assert_eq!(report.valid_rows.len(), 1);

    let record = &report.valid_rows[0];
    assert_eq!(record.len(), 1);
    assert_eq!(record.get("code"), Some(&CellValue::from("A-1")));
    assert!(!record.contains_key("quantity"));
    assert!(!record.contains_key("shipped"));
    assert!(!record.contains_key("paid"));
}

#[test]
fn test_whitespace_is_present_not_missing() {
    let rows = vec![
        row(&[("Code", CellValue::from("  "))]),
        row(&[("Code", CellValue::from("B-2")), ("Quantity", CellValue::from(" "))]),
    ];

    let report = validator().validate_rows(&rows, &rules(), &ctx());

    // Whitespace satisfies a required string column but is not a number
    assert_eq!(report.valid_rows.len(), 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].row, 3);
    assert_eq!(report.errors[0].message, "Quantity must be a number");
}

#[test]
fn test_required_error_suppresses_nothing_else_in_row() {
    let rows = vec![row(&[
        ("Quantity", CellValue::from(0.0)),
        ("Paid", CellValue::from("maybe")),
    ])];

    let report = validator().validate_rows(&rows, &rules(), &ctx());
    let messages: Vec<&str> = report.errors.iter().map(|e| e.message.as_str()).collect();

    assert_eq!(
        messages,
        vec![
            "Code is required",
            "Quantity must be greater than 1",
            "Paid must be Yes or No",
        ]
    );
}
