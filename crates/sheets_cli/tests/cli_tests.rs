use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the sheetcheck binary
// TODO: Migrate to cargo::cargo_bin_cmd! macro when available
// See: https://github.com/assert-rs/assert_cmd/issues/139
#[allow(deprecated)]
fn sheetcheck() -> Command {
    Command::cargo_bin("sheetcheck").expect("Failed to find sheetcheck binary")
}

const NOW: &str = "2025-01-26";

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_valid_file() {
    sheetcheck()
        .args(["validate", "--now", NOW])
        .arg(fixture_path("valid.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Sheet1"))
        .stdout(predicate::str::contains("2 of 2 rows valid"))
        .stdout(predicate::str::contains("All data is valid"));
}

#[test]
fn test_validate_reports_row_errors() {
    sheetcheck()
        .args(["validate", "--now", NOW])
        .arg(fixture_path("upload.csv"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Row 3: Name is required"))
        .stdout(predicate::str::contains("Validation FAILED"));
}

#[test]
fn test_validate_json_output() {
    let output = sheetcheck()
        .args(["validate", "--now", NOW, "--format", "json"])
        .arg(fixture_path("upload.csv"))
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be valid JSON");
    let sheet = &json["Sheet1"];

    assert_eq!(sheet["valid"], false);
    assert_eq!(sheet["totalRows"], 2);
    assert_eq!(
        sheet["errors"],
        serde_json::json!([{"row": 3, "column": "Name", "message": "Name is required"}])
    );
    assert_eq!(
        sheet["validRows"],
        serde_json::json!([{
            "amount": 1500,
            "date": "26.01.25",
            "name": "John",
            "verified": true
        }])
    );
}

#[test]
fn test_validate_date_rule_depends_on_now() {
    sheetcheck()
        .args(["validate", "--now", "2025-03-01"])
        .arg(fixture_path("valid.csv"))
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Row 2: Date must be within the current month",
        ));
}

#[test]
fn test_validate_with_yaml_rules() {
    sheetcheck()
        .args(["validate", "--now", NOW, "--rules"])
        .arg(fixture_path("orders_rules.yml"))
        .arg(fixture_path("orders.csv"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Row 3: Quantity must be greater than 1"))
        .stdout(predicate::str::contains("Row 3: Shipment date is too old"));
}

#[test]
fn test_validate_with_toml_rules() {
    sheetcheck()
        .args(["validate", "--now", NOW, "--rules"])
        .arg(fixture_path("orders_rules.toml"))
        .arg(fixture_path("orders.csv"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Row 3: Quantity must be greater than 1"))
        .stdout(predicate::str::contains("Shipment date").not());
}

#[test]
fn test_validate_unreadable_file() {
    sheetcheck()
        .arg("validate")
        .arg(fixture_path("corrupt.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error processing file"));
}

#[test]
fn test_validate_missing_file() {
    sheetcheck()
        .arg("validate")
        .arg("nonexistent.xlsx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_validate_unsupported_format() {
    sheetcheck()
        .arg("validate")
        .arg(fixture_path("orders_rules.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported spreadsheet format"));
}

#[test]
fn test_validate_empty_file() {
    sheetcheck()
        .arg("validate")
        .arg(fixture_path("empty.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Excel file is empty"));
}

#[test]
fn test_validate_unknown_sheet() {
    sheetcheck()
        .args(["validate", "--sheet", "Summary"])
        .arg(fixture_path("valid.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sheet 'Summary' not found"));
}

#[test]
fn test_validate_invalid_now() {
    sheetcheck()
        .args(["validate", "--now", "someday"])
        .arg(fixture_path("valid.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --now value"));
}

// ============================================================================
// rules command tests
// ============================================================================

#[test]
fn test_rules_builtin() {
    sheetcheck()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in defaults"))
        .stdout(predicate::str::contains("default"))
        .stdout(predicate::str::contains("specialSheet"))
        .stdout(predicate::str::contains("Invoice Date"))
        .stdout(predicate::str::contains("transform yes_no"));
}

#[test]
fn test_rules_json() {
    let output = sheetcheck()
        .args(["rules", "--format", "json", "--rules"])
        .arg(fixture_path("orders_rules.yml"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let columns = json["sheets"]["default"]["columns"].as_array().unwrap();

    assert_eq!(columns.len(), 4);
    assert_eq!(columns[1]["min"], 1.0);
    assert_eq!(columns[2]["validate"], "since_previous_month");
    assert_eq!(columns[2]["errorMessage"], "Shipment date is too old");
    assert_eq!(columns[3]["field"], "paid");
}

#[test]
fn test_rules_missing_default() {
    sheetcheck()
        .args(["rules", "--rules"])
        .arg(fixture_path("missing_default.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load rule file"))
        .stderr(predicate::str::contains("default"));
}

#[test]
fn test_rules_unknown_predicate() {
    sheetcheck()
        .args(["rules", "--rules"])
        .arg(fixture_path("unknown_predicate.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("next_week"));
}

// ============================================================================
// export and import command tests
// ============================================================================

#[test]
fn test_export_accepted_rows() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("validated.xlsx");

    sheetcheck()
        .args(["export", "--now", NOW, "--output"])
        .arg(&output_path)
        .arg(fixture_path("upload.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 records"))
        .stdout(predicate::str::contains("1 rows failed validation"));

    let workbook = sheets_io::read_workbook(&output_path).unwrap();
    let sheet = workbook.sheet("Validated Data").unwrap();
    assert_eq!(sheet.len(), 1);
    assert_eq!(
        sheet.rows()[0].get("name"),
        Some(&sheets_core::CellValue::from("John"))
    );
}

#[test]
fn test_import_appends_to_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("records.jsonl");

    for _ in 0..2 {
        sheetcheck()
            .args(["import", "--now", NOW, "--batch-size", "1", "--store"])
            .arg(&store)
            .arg(fixture_path("valid.csv"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Successfully imported 2 records"));
    }

    let content = fs::read_to_string(&store).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["name"], "John");
    assert_eq!(lines[0]["sheetName"], "Sheet1");
    assert_eq!(lines[1]["verified"], false);
}

#[test]
fn test_import_nothing_valid() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("records.jsonl");

    sheetcheck()
        .args(["import", "--now", NOW, "--store"])
        .arg(&store)
        .arg(fixture_path("all_invalid.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid records to import"));

    assert!(!store.exists());
}

// ============================================================================
// general CLI tests
// ============================================================================

#[test]
fn test_help() {
    sheetcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn test_version() {
    sheetcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetcheck"));
}
