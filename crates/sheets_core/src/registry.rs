//! Rule registry.
//!
//! Maps sheet identifiers to rule sets. Every registry owns a `default` rule set
//! used for sheets without an explicit entry, so resolution never fails; a registry
//! without one cannot be constructed.

use crate::{
    builtins, ColumnDefinition, ColumnRule, ColumnRuleBuilder, ColumnType, RegistryDefinition,
    Result, RuleSet, RuleSetBuilder, SheetError,
};
use std::collections::HashMap;

/// Identifier of the fallback rule set.
pub const DEFAULT_RULE_SET: &str = "default";

/// Immutable mapping from sheet identifier to rule set.
///
/// # Example
///
/// ```rust
/// use sheets_core::Registry;
///
/// let registry = Registry::builtin();
///
/// assert_eq!(registry.resolve("specialSheet").name(), "specialSheet");
/// assert_eq!(registry.resolve("January Data").name(), "default");
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    default: RuleSet,
    sheets: HashMap<String, RuleSet>,
}

impl Registry {
    /// Creates a registry from rule sets keyed by sheet identifier.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::DuplicateRuleSet` if a sheet identifier appears twice,
    /// and `SheetError::MissingDefaultRuleSet` if no rule set is registered under
    /// [`DEFAULT_RULE_SET`].
    pub fn new<I>(rule_sets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, RuleSet)>,
    {
        let mut sheets: HashMap<String, RuleSet> = HashMap::new();
        for (sheet, rule_set) in rule_sets {
            if sheets.contains_key(&sheet) {
                return Err(SheetError::DuplicateRuleSet(sheet));
            }
            sheets.insert(sheet, rule_set);
        }
        let default = sheets
            .remove(DEFAULT_RULE_SET)
            .ok_or(SheetError::MissingDefaultRuleSet)?;
        Ok(Self { default, sheets })
    }

    /// Builds a registry from its configuration form.
    ///
    /// Predicate and transform names are resolved against the built-in catalogue.
    /// Unknown names, duplicate columns and a missing `default` are all reported
    /// here rather than at validation time.
    pub fn from_definition(definition: &RegistryDefinition) -> Result<Self> {
        let mut rule_sets = Vec::with_capacity(definition.sheets.len());

        for (sheet, rule_set) in &definition.sheets {
            let mut builder = RuleSetBuilder::new(sheet.clone());
            for column in &rule_set.columns {
                builder = builder.column(column.name.clone(), resolve_column(sheet, column)?);
            }
            rule_sets.push((sheet.clone(), builder.try_build()?));
        }

        Self::new(rule_sets)
    }

    /// Returns the rule sets of the original upload service.
    ///
    /// `default` checks a name, a non-negative amount, a date within the current
    /// month and an optional Yes/No verification flag. `specialSheet` accepts
    /// invoice dates up to one month old and an optional receipt date.
    pub fn builtin() -> Self {
        let default = RuleSetBuilder::new(DEFAULT_RULE_SET)
            .column("Name", name_rule())
            .column("Amount", amount_rule())
            .column(
                "Date",
                ColumnRuleBuilder::new(ColumnType::Date, "date")
                    .required(true)
                    .validate(builtins::current_month())
                    .error_message("Date must be within the current month")
                    .build(),
            )
            .column("Verified", verified_rule())
            .build();

        let special = RuleSetBuilder::new("specialSheet")
            .column("Name", name_rule())
            .column("Amount", amount_rule())
            .column(
                "Invoice Date",
                ColumnRuleBuilder::new(ColumnType::Date, "date")
                    .required(true)
                    .validate(builtins::since_previous_month())
                    .error_message("Date must not be older than previous month")
                    .build(),
            )
            .column(
                "Receipt Date",
                ColumnRule::new(ColumnType::Date, "receiptDate"),
            )
            .column("Verified", verified_rule())
            .build();

        Self {
            default,
            sheets: HashMap::from([("specialSheet".to_string(), special)]),
        }
    }

    /// Returns the rule set for a sheet, falling back to `default`.
    pub fn resolve(&self, sheet: &str) -> &RuleSet {
        self.sheets.get(sheet).unwrap_or(&self.default)
    }

    /// Returns true if the sheet has its own rule set.
    pub fn contains(&self, sheet: &str) -> bool {
        sheet == DEFAULT_RULE_SET || self.sheets.contains_key(sheet)
    }

    /// Returns the fallback rule set.
    pub fn default_rule_set(&self) -> &RuleSet {
        &self.default
    }

    /// Returns all registered identifiers, `default` first and the rest sorted.
    pub fn sheet_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sheets.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids.insert(0, DEFAULT_RULE_SET);
        ids
    }
}

fn name_rule() -> ColumnRule {
    ColumnRuleBuilder::new(ColumnType::String, "name")
        .required(true)
        .build()
}

fn amount_rule() -> ColumnRule {
    ColumnRuleBuilder::new(ColumnType::Number, "amount")
        .required(true)
        .min(0.0)
        .build()
}

fn verified_rule() -> ColumnRule {
    ColumnRuleBuilder::new(ColumnType::Boolean, "verified")
        .transform(builtins::yes_no())
        .build()
}

fn resolve_column(sheet: &str, column: &ColumnDefinition) -> Result<ColumnRule> {
    let mut rule = ColumnRule::new(column.column_type, column.field.clone());
    rule.required = column.required;
    rule.min = column.min;
    rule.error_message = column.error_message.clone();

    if let Some(name) = &column.validate {
        rule.validate = Some(builtins::predicate(name).ok_or_else(|| {
            SheetError::UnknownPredicate {
                rule_set: sheet.to_string(),
                column: column.name.clone(),
                name: name.clone(),
            }
        })?);
    }

    if let Some(name) = &column.transform {
        rule.transform = Some(builtins::transform(name).ok_or_else(|| {
            SheetError::UnknownTransform {
                rule_set: sheet.to_string(),
                column: column.name.clone(),
                name: name.clone(),
            }
        })?);
    }

    Ok(rule)
}
