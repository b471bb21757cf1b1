//! Cell validation logic.
//!
//! This module checks one present cell value against its column rule: the type
//! check selected by the column type, the numeric lower bound and the rule's
//! predicate, in that order.

use crate::{dates, CellError};
use sheets_core::{CellValue, ColumnRule, ColumnType, ParsedValue, ValidationContext};

/// Validates present cell values against column rules.
///
/// Missing values never reach this type; required-ness is decided by the engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct CellValidator;

impl CellValidator {
    /// Creates a new cell validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a present value and returns it parsed.
    ///
    /// # Arguments
    ///
    /// * `column` - Column header, used in error messages
    /// * `rule` - Rule the column is declared with
    /// * `value` - Raw cell value, not missing
    /// * `ctx` - Evaluation context passed to the rule predicate
    pub fn validate(
        &self,
        column: &str,
        rule: &ColumnRule,
        value: &CellValue,
        ctx: &ValidationContext,
    ) -> Result<ParsedValue, CellError> {
        let parsed = match rule.column_type {
            ColumnType::String => Ok(self.parse_string(value)),
            ColumnType::Number => self.parse_number(column, rule, value),
            ColumnType::Date => self.parse_date(column, value),
            ColumnType::Boolean => self.parse_boolean(column, value),
        }?;

        if let Some(predicate) = &rule.validate {
            if !predicate.evaluate(&parsed, &ctx.now) {
                return Err(CellError::rejected(column, rule.error_message.as_deref()));
            }
        }

        Ok(parsed)
    }

    fn parse_string(&self, value: &CellValue) -> ParsedValue {
        match value {
            CellValue::Text(s) => ParsedValue::Text(s.clone()),
            other => ParsedValue::Text(other.to_string()),
        }
    }

    fn parse_number(
        &self,
        column: &str,
        rule: &ColumnRule,
        value: &CellValue,
    ) -> Result<ParsedValue, CellError> {
        let number = match value {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_numeric_text(s),
            _ => None,
        }
        .filter(|n| n.is_finite())
        .ok_or_else(|| CellError::not_a_number(column))?;

        // Inclusive bound: only values strictly below `min` fail
        if let Some(min) = rule.min {
            if number < min {
                return Err(CellError::below_minimum(column, min));
            }
        }

        Ok(ParsedValue::Number(number))
    }

    fn parse_date(&self, column: &str, value: &CellValue) -> Result<ParsedValue, CellError> {
        dates::parse_date(value)
            .map(ParsedValue::Date)
            .ok_or_else(|| CellError::invalid_date(column))
    }

    fn parse_boolean(&self, column: &str, value: &CellValue) -> Result<ParsedValue, CellError> {
        match value {
            CellValue::Bool(b) => Ok(ParsedValue::Bool(*b)),
            CellValue::Text(s) => match s.to_lowercase().as_str() {
                "yes" => Ok(ParsedValue::Bool(true)),
                "no" => Ok(ParsedValue::Bool(false)),
                _ => Err(CellError::not_yes_no(column)),
            },
            _ => Err(CellError::not_yes_no(column)),
        }
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sheets_core::{builtins, ColumnRuleBuilder, Predicate};

    fn ctx() -> ValidationContext {
        ValidationContext::on(NaiveDate::from_ymd_opt(2025, 1, 26).unwrap())
    }

    fn amount() -> ColumnRule {
        ColumnRuleBuilder::new(ColumnType::Number, "amount")
            .required(true)
            .min(0.0)
            .build()
    }

    #[test]
    fn test_number_accepts_numeric_cells_and_text() {
        let v = CellValidator::new();
        assert_eq!(
            v.validate("Amount", &amount(), &CellValue::Number(1500.0), &ctx()),
            Ok(ParsedValue::Number(1500.0))
        );
        assert_eq!(
            v.validate("Amount", &amount(), &" 12.5 ".into(), &ctx()),
            Ok(ParsedValue::Number(12.5))
        );
    }

    #[test]
    fn test_number_rejects_non_numeric() {
        let v = CellValidator::new();
        for value in [
            CellValue::from("invalid"),
            CellValue::from("   "),
            CellValue::from("NaN"),
            CellValue::from("inf"),
            CellValue::Bool(true),
        ] {
            assert_eq!(
                v.validate("Amount", &amount(), &value, &ctx()),
                Err(CellError::not_a_number("Amount")),
                "value {:?} should not be a number",
                value
            );
        }
    }

    #[test]
    fn test_number_min_is_inclusive() {
        let v = CellValidator::new();
        assert!(v.validate("Amount", &amount(), &CellValue::Number(0.0), &ctx()).is_ok());
        assert_eq!(
            v.validate("Amount", &amount(), &CellValue::Number(-0.0001), &ctx()),
            Err(CellError::below_minimum("Amount", 0.0))
        );
    }

    #[test]
    fn test_date_with_predicate() {
        let rule = ColumnRuleBuilder::new(ColumnType::Date, "date")
            .validate(builtins::current_month())
            .error_message("Date must be within the current month")
            .build();
        let v = CellValidator::new();

        assert!(v.validate("Date", &rule, &"20.01.25".into(), &ctx()).is_ok());
        assert_eq!(
            v.validate("Date", &rule, &"15.02.25".into(), &ctx())
                .unwrap_err()
                .to_string(),
            "Date must be within the current month"
        );
        assert_eq!(
            v.validate("Date", &rule, &"someday".into(), &ctx()),
            Err(CellError::invalid_date("Date"))
        );
    }

    #[test]
    fn test_predicate_generic_message() {
        let rule = ColumnRuleBuilder::new(ColumnType::Date, "date")
            .validate(Predicate::new("never", |_, _| false))
            .build();

        let err = CellValidator::new()
            .validate("Due", &rule, &"2025-01-02".into(), &ctx())
            .unwrap_err();
        assert_eq!(err.to_string(), "Due validation failed");
    }

    #[test]
    fn test_boolean_acceptance() {
        let rule = ColumnRule::new(ColumnType::Boolean, "verified");
        let v = CellValidator::new();

        for accepted in ["Yes", "YES", "no", "No"] {
            assert!(v.validate("Verified", &rule, &accepted.into(), &ctx()).is_ok());
        }
        assert!(v.validate("Verified", &rule, &CellValue::Bool(false), &ctx()).is_ok());

        for rejected in [CellValue::from("maybe"), CellValue::from(" yes"), CellValue::Number(1.0)] {
            assert_eq!(
                v.validate("Verified", &rule, &rejected, &ctx()),
                Err(CellError::not_yes_no("Verified"))
            );
        }
    }

    #[test]
    fn test_string_accepts_anything_present() {
        let rule = ColumnRule::new(ColumnType::String, "name");
        let v = CellValidator::new();

        assert_eq!(
            v.validate("Name", &rule, &CellValue::Number(42.0), &ctx()),
            Ok(ParsedValue::Text("42".to_string()))
        );
    }
}
