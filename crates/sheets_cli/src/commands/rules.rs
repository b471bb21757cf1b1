use anyhow::Result;
use colored::*;
use serde_json::json;
use sheets_core::{ColumnRule, Registry, RuleSet};
use tracing::info;

use crate::output;

pub fn execute(rules: Option<&str>, format: &str) -> Result<()> {
    info!("Listing rule sets");

    let registry = super::load_registry(rules)?;

    match format {
        "json" => print_json(&registry)?,
        _ => print_text(&registry, rules),
    }

    Ok(())
}

fn print_text(registry: &Registry, source: Option<&str>) {
    output::print_info(&format!(
        "Rules loaded from {}",
        source.unwrap_or("built-in defaults")
    ));

    for id in registry.sheet_ids() {
        let rule_set = registry.resolve(id);
        println!("\n{} ({} columns)", id.bold(), rule_set.len());
        for (column, rule) in rule_set.iter() {
            println!("  {:<16} {}", column, describe(rule));
        }
    }
    println!(
        "\n{}",
        "Sheets without an entry of their own use 'default'.".dimmed()
    );
}

fn describe(rule: &ColumnRule) -> String {
    let mut parts = vec![rule.column_type.to_string()];
    parts.push(if rule.required { "required" } else { "optional" }.to_string());
    if let Some(min) = rule.min {
        parts.push(format!("min {}", min));
    }
    if let Some(predicate) = &rule.validate {
        parts.push(format!("validate {}", predicate.name()));
    }
    if let Some(transform) = &rule.transform {
        parts.push(format!("transform {}", transform.name()));
    }
    format!("{} -> {}", parts.join(", "), rule.field)
}

fn print_json(registry: &Registry) -> Result<()> {
    let sheets: serde_json::Map<String, serde_json::Value> = registry
        .sheet_ids()
        .into_iter()
        .map(|id| (id.to_string(), rule_set_json(registry.resolve(id))))
        .collect();

    println!("{}", serde_json::to_string_pretty(&json!({ "sheets": sheets }))?);
    Ok(())
}

fn rule_set_json(rule_set: &RuleSet) -> serde_json::Value {
    let columns: Vec<_> = rule_set
        .iter()
        .map(|(column, rule)| {
            json!({
                "name": column,
                "type": rule.column_type,
                "required": rule.required,
                "min": rule.min,
                "validate": rule.validate.as_ref().map(|p| p.name()),
                "errorMessage": rule.error_message,
                "transform": rule.transform.as_ref().map(|t| t.name()),
                "field": rule.field,
            })
        })
        .collect();

    json!({ "columns": columns })
}
