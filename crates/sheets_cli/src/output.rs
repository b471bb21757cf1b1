use anyhow::Result;
use colored::*;
use sheets_core::{SheetReport, WorkbookReport};

pub fn print_workbook_report(report: &WorkbookReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &WorkbookReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    for (sheet, sheet_report) in &report.sheets {
        print_sheet(sheet, sheet_report);
    }

    let total_rows: usize = report.sheets.iter().map(|(_, r)| r.total_rows).sum();
    let accepted: usize = report.sheets.iter().map(|(_, r)| r.valid_rows.len()).sum();

    println!("\n{}", "Summary:".bold());
    println!("  Sheets:        {}", report.sheets.len());
    println!("  Rows:          {}", total_rows);
    println!("  Valid rows:    {}", accepted);
    println!("  Total errors:  {}", report.error_count());

    if report.valid() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "All data is valid".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }
    println!("{}", "═".repeat(60));
}

fn print_sheet(sheet: &str, report: &SheetReport) {
    let status = if report.valid {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!(
        "\n{} {} ({} of {} rows valid)",
        status,
        sheet.bold(),
        report.valid_rows.len(),
        report.total_rows
    );

    for error in &report.errors {
        println!("  {}", error.to_string().red());
    }
}

fn print_json_report(report: &WorkbookReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
