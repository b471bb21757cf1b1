//! Builder pattern for creating rule sets.
//!
//! This module provides ergonomic builders for constructing rule sets
//! and their column rules with a fluent API.

use crate::{ColumnRule, ColumnType, Predicate, Result, RuleSet, SheetError, Transform};
use std::collections::HashSet;

/// Builder for creating a `RuleSet`.
///
/// # Example
///
/// ```rust
/// use sheets_core::{ColumnRuleBuilder, ColumnType, RuleSetBuilder};
///
/// let rules = RuleSetBuilder::new("default")
///     .column(
///         "Name",
///         ColumnRuleBuilder::new(ColumnType::String, "name")
///             .required(true)
///             .build(),
///     )
///     .column(
///         "Amount",
///         ColumnRuleBuilder::new(ColumnType::Number, "amount")
///             .required(true)
///             .min(0.0)
///             .build(),
///     )
///     .build();
///
/// assert_eq!(rules.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    name: String,
    columns: Vec<(String, ColumnRule)>,
}

impl RuleSetBuilder {
    /// Creates a new rule set builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Sheet identifier the rule set is registered under
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Adds a column rule.
    pub fn column(mut self, column: impl Into<String>, rule: ColumnRule) -> Self {
        self.columns.push((column.into(), rule));
        self
    }

    /// Builds the rule set, rejecting duplicate column names.
    pub fn try_build(self) -> Result<RuleSet> {
        let mut seen = HashSet::new();
        for (column, _) in &self.columns {
            if !seen.insert(column.as_str()) {
                return Err(SheetError::DuplicateColumn {
                    rule_set: self.name.clone(),
                    column: column.clone(),
                });
            }
        }
        Ok(RuleSet::from_parts(self.name, self.columns))
    }

    /// Builds the rule set.
    ///
    /// # Panics
    ///
    /// Panics if the same column name was declared twice.
    pub fn build(self) -> RuleSet {
        match self.try_build() {
            Ok(rules) => rules,
            Err(err) => panic!("{}", err),
        }
    }
}

/// Builder for creating a `ColumnRule`.
///
/// # Example
///
/// ```rust
/// use sheets_core::{builtins, ColumnRuleBuilder, ColumnType};
///
/// let rule = ColumnRuleBuilder::new(ColumnType::Date, "date")
///     .required(true)
///     .validate(builtins::current_month())
///     .error_message("Date must be within the current month")
///     .build();
///
/// assert!(rule.required);
/// ```
#[derive(Debug)]
pub struct ColumnRuleBuilder {
    rule: ColumnRule,
}

impl ColumnRuleBuilder {
    /// Creates a new column rule builder.
    ///
    /// # Arguments
    ///
    /// * `column_type` - Type check applied to present values
    /// * `field` - Destination key in the output record
    pub fn new(column_type: ColumnType, field: impl Into<String>) -> Self {
        Self {
            rule: ColumnRule::new(column_type, field),
        }
    }

    /// Sets whether the column must have a value.
    pub fn required(mut self, required: bool) -> Self {
        self.rule.required = required;
        self
    }

    /// Sets the numeric lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.rule.min = Some(min);
        self
    }

    /// Sets the acceptance predicate.
    pub fn validate(mut self, predicate: Predicate) -> Self {
        self.rule.validate = Some(predicate);
        self
    }

    /// Sets the message reported when the predicate fails.
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.rule.error_message = Some(message.into());
        self
    }

    /// Sets the output transform.
    pub fn transform(mut self, transform: Transform) -> Self {
        self.rule.transform = Some(transform);
        self
    }

    /// Builds the column rule.
    pub fn build(self) -> ColumnRule {
        self.rule
    }
}
