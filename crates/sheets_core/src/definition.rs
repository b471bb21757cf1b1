//! Serializable rule definitions.
//!
//! Rule sets hold function references and cannot be deserialized directly. The
//! definitions here are their configuration-file form: predicates and transforms are
//! referred to by name and resolved against [`builtins`](crate::builtins) when a
//! [`Registry`](crate::Registry) is built.

use crate::ColumnType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration form of a whole rule registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryDefinition {
    /// Rule sets keyed by sheet identifier; must include `default`
    pub sheets: BTreeMap<String, RuleSetDefinition>,
}

/// Configuration form of one rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetDefinition {
    /// Column definitions in evaluation order
    pub columns: Vec<ColumnDefinition>,
}

/// Configuration form of one column rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnDefinition {
    /// Header text the column is matched by
    pub name: String,

    /// Whether a missing value is an error
    #[serde(default)]
    pub required: bool,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Numeric lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Name of a built-in predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<String>,

    /// Message reported when the predicate fails
    #[serde(
        default,
        alias = "errorMessage",
        skip_serializing_if = "Option::is_none"
    )]
    pub error_message: Option<String>,

    /// Name of a built-in transform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,

    /// Destination key in the output record
    pub field: String,
}

impl ColumnDefinition {
    /// Creates an optional column definition.
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
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
