//! Cell-level validation failures.
//!
//! The `Display` text of each variant is the exact message reported to the user in
//! a row error.

use thiserror::Error;

/// Reasons a single cell fails its column rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
    /// Required column has no value
    #[error("{column} is required")]
    Required { column: String },

    /// Number column holds something that is not a number
    #[error("{column} must be a number")]
    NotANumber { column: String },

    /// Number is strictly below the rule's lower bound
    #[error("{column} must be greater than {min}")]
    BelowMinimum { column: String, min: f64 },

    /// Date column holds something that is not a date
    #[error("{column} must be a valid date")]
    InvalidDate { column: String },

    /// Boolean column holds something other than a boolean or Yes/No
    #[error("{column} must be Yes or No")]
    NotYesNo { column: String },

    /// Rule predicate rejected the parsed value
    #[error("{message}")]
    Rejected { column: String, message: String },
}

impl CellError {
    /// Creates a new required-value error.
    pub fn required(column: impl Into<String>) -> Self {
        Self::Required {
            column: column.into(),
        }
    }

    /// Creates a new not-a-number error.
    pub fn not_a_number(column: impl Into<String>) -> Self {
        Self::NotANumber {
            column: column.into(),
        }
    }

    /// Creates a new lower-bound error.
    pub fn below_minimum(column: impl Into<String>, min: f64) -> Self {
        Self::BelowMinimum {
            column: column.into(),
            min,
        }
    }

    /// Creates a new invalid-date error.
    pub fn invalid_date(column: impl Into<String>) -> Self {
        Self::InvalidDate {
            column: column.into(),
        }
    }

    /// Creates a new Yes/No error.
    pub fn not_yes_no(column: impl Into<String>) -> Self {
        Self::NotYesNo {
            column: column.into(),
        }
    }

    /// Creates a new predicate rejection, falling back to a generic message.
    pub fn rejected(column: impl Into<String>, message: Option<&str>) -> Self {
        let column = column.into();
        let message = match message {
            Some(m) => m.to_string(),
            None => format!("{} validation failed", column),
        };
        Self::Rejected { column, message }
    }

    /// Returns the column the error refers to.
    pub fn column(&self) -> &str {
        match self {
            Self::Required { column }
            | Self::NotANumber { column }
            | Self::BelowMinimum { column, .. }
            | Self::InvalidDate { column }
            | Self::NotYesNo { column }
            | Self::Rejected { column, .. } => column,
        }
    }
}
