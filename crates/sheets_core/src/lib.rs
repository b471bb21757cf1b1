//! # Sheets Core
//!
//! Core data structures and types for spreadsheet rule validation.
//!
//! This crate provides the building blocks shared by the validation engine, the
//! rule-file parser and the spreadsheet collaborators. A rule set is a declarative
//! description of how the columns of one kind of sheet are checked and renamed.
//!
//! ## Key Concepts
//!
//! - **Column rule**: required-ness, type, lower bound, predicate, transform and output field
//! - **Rule set**: ordered column rules for one sheet kind
//! - **Registry**: rule sets keyed by sheet identifier, with a mandatory `default`
//! - **Sheet report**: row errors plus transformed records of accepted rows
//!
//! ## Example
//!
//! ```rust
//! use sheets_core::{ColumnRuleBuilder, ColumnType, Registry, RuleSetBuilder};
//!
//! let rules = RuleSetBuilder::new("default")
//!     .column(
//!         "Name",
//!         ColumnRuleBuilder::new(ColumnType::String, "name")
//!             .required(true)
//!             .build(),
//!     )
//!     .build();
//!
//! let registry = Registry::new(vec![("default".to_string(), rules)]).unwrap();
//! assert_eq!(registry.resolve("anything").column_names(), vec!["Name"]);
//! ```

pub mod builder;
pub mod builtins;
pub mod definition;
pub mod error;
pub mod registry;
pub mod rules;
pub mod validator;
pub mod value;

pub use builder::*;
pub use definition::*;
pub use error::*;
pub use registry::*;
pub use rules::*;
pub use validator::*;
pub use value::*;
