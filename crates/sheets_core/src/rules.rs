//! Column rules and rule sets.
//!
//! A [`RuleSet`] describes how the columns of one kind of sheet are validated and
//! renamed. Each column gets a [`ColumnRule`]: the column type selects the built-in
//! type check, while the optional [`Predicate`] and [`Transform`] are plain function
//! references attached to the rule.

use crate::{CellValue, ParsedValue};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Type of a spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text, always accepted
    String,
    /// Numeric value, optionally bounded below
    Number,
    /// Calendar date or date-time
    Date,
    /// Native boolean or Yes/No text
    Boolean,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

type PredicateFn = dyn Fn(&ParsedValue, &NaiveDateTime) -> bool + Send + Sync;
type TransformFn = dyn Fn(&CellValue) -> CellValue + Send + Sync;

/// A named acceptance check evaluated on a parsed cell value.
///
/// The second argument is the evaluation instant taken from the validation context,
/// so predicates such as "within the current month" stay pure.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    func: Arc<PredicateFn>,
}

impl Predicate {
    /// Creates a predicate from a function.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&ParsedValue, &NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Returns the name the predicate was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates the predicate against `value` at instant `now`.
    pub fn evaluate(&self, value: &ParsedValue, now: &NaiveDateTime) -> bool {
        (self.func)(value, now)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

/// A named mapping from an accepted raw value to its output representation.
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    /// Creates a transform from a function.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&CellValue) -> CellValue + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Returns the name the transform was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the transform.
    pub fn apply(&self, value: &CellValue) -> CellValue {
        (self.func)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}

/// Validation and mapping rule for one input column.
#[derive(Debug, Clone)]
pub struct ColumnRule {
    /// Whether a missing value is an error
    pub required: bool,

    /// Built-in type check applied to present values
    pub column_type: ColumnType,

    /// Numeric lower bound; only values strictly below it fail
    pub min: Option<f64>,

    /// Extra acceptance check on the parsed value
    pub validate: Option<Predicate>,

    /// Message reported when `validate` rejects a value
    pub error_message: Option<String>,

    /// Mapping applied to present values in the output record
    pub transform: Option<Transform>,

    /// Destination key in the output record
    pub field: String,
}

impl ColumnRule {
    /// Creates an optional rule with no bounds, predicate or transform.
    pub fn new(column_type: ColumnType, field: impl Into<String>) -> Self {
        Self {
            required: false,
            column_type,
            min: None,
            validate: None,
            error_message: None,
            transform: None,
            field: field.into(),
        }
    }
}

/// Ordered set of column rules for one kind of sheet.
///
/// Columns are evaluated in declaration order, which is also the order errors are
/// reported in within a row. Column names are exact, case- and whitespace-sensitive
/// header matches.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    columns: Vec<(String, ColumnRule)>,
}

impl RuleSet {
    pub(crate) fn from_parts(name: String, columns: Vec<(String, ColumnRule)>) -> Self {
        Self { name, columns }
    }

    /// Returns the identifier this rule set is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rule for a column, if declared.
    pub fn get(&self, column: &str) -> Option<&ColumnRule> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, rule)| rule)
    }

    /// Iterates over `(column, rule)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnRule)> {
        self.columns.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Returns the declared column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns the number of declared columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleSetBuilder;

    #[test]
    fn test_column_type_serde() {
        let json = serde_json::to_string(&ColumnType::Boolean).unwrap();
        assert_eq!(json, "\"boolean\"");

        let parsed: ColumnType = serde_json::from_str("\"date\"").unwrap();
        assert_eq!(parsed, ColumnType::Date);
    }

    #[test]
    fn test_predicate_debug_shows_name() {
        let predicate = Predicate::new("always", |_, _| true);
        assert_eq!(format!("{:?}", predicate), "Predicate(\"always\")");
    }

    #[test]
    fn test_transform_apply() {
        let upper = Transform::new("upper", |v| match v {
            CellValue::Text(s) => CellValue::Text(s.to_uppercase()),
            other => other.clone(),
        });
        assert_eq!(upper.apply(&"abc".into()), CellValue::from("ABC"));
        assert_eq!(upper.apply(&CellValue::Number(1.0)), CellValue::Number(1.0));
    }

    #[test]
    fn test_rule_set_preserves_declaration_order() {
        let rules = RuleSetBuilder::new("orders")
            .column("Zeta", ColumnRule::new(ColumnType::String, "zeta"))
            .column("Alpha", ColumnRule::new(ColumnType::Number, "alpha"))
            .build();

        assert_eq!(rules.column_names(), vec!["Zeta", "Alpha"]);
        assert_eq!(rules.get("Alpha").map(|r| r.column_type), Some(ColumnType::Number));
        assert!(rules.get("alpha").is_none());
    }
}
