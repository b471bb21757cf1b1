//! Error types for rule configuration and sheet processing.
//!
//! These are structural failures: a broken rule registry or input that cannot be
//! decoded into rows at all. Invalid cell data is never an error here; it is
//! reported as a [`RowError`](crate::RowError) inside a sheet report.

use thiserror::Error;

/// Result type for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;

/// Main error type for sheet operations.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Registry was built without a fallback rule set
    #[error("Rule registry has no 'default' rule set")]
    MissingDefaultRuleSet,

    /// Same sheet identifier registered twice
    #[error("Duplicate rule set '{0}'")]
    DuplicateRuleSet(String),

    /// Same column declared twice in one rule set
    #[error("Duplicate column '{column}' in rule set '{rule_set}'")]
    DuplicateColumn {
        /// Rule set identifier
        rule_set: String,
        /// Column name declared twice
        column: String,
    },

    /// Column refers to a predicate that is not registered
    #[error("Unknown predicate '{name}' for column '{column}' in rule set '{rule_set}'")]
    UnknownPredicate {
        /// Rule set identifier
        rule_set: String,
        /// Column name
        column: String,
        /// Predicate name
        name: String,
    },

    /// Column refers to a transform that is not registered
    #[error("Unknown transform '{name}' for column '{column}' in rule set '{rule_set}'")]
    UnknownTransform {
        /// Rule set identifier
        rule_set: String,
        /// Column name
        column: String,
        /// Transform name
        name: String,
    },

    /// Raw input could not be decoded into rows
    #[error("Unreadable input: {0}")]
    UnreadableInput(String),
}
