//! Parser for spreadsheet rule files (YAML/TOML formats).
//!
//! This module provides functionality to parse rule registries from YAML and TOML
//! files into a [`RegistryDefinition`] and to resolve them into a ready-to-use
//! [`Registry`].
//!
//! # Example
//!
//! ```rust
//! use sheets_parser::load_registry_str;
//! use sheets_parser::RulesFormat;
//!
//! let yaml = r#"
//! sheets:
//!   default:
//!     columns:
//!       - name: Name
//!         type: string
//!         required: true
//!         field: name
//!       - name: Amount
//!         type: number
//!         required: true
//!         min: 0
//!         field: amount
//! "#;
//!
//! let registry = load_registry_str(yaml, RulesFormat::Yaml).expect("Failed to load rules");
//! assert_eq!(registry.resolve("any sheet").column_names(), vec!["Name", "Amount"]);
//! ```

use sheets_core::{Registry, RegistryDefinition, SheetError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during rule file parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Rule file parsed but does not describe a usable registry
    #[error("Invalid rule registry: {0}")]
    Registry(#[from] SheetError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported rule file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a registry definition from a YAML string.
///
/// # Example
///
/// ```rust
/// use sheets_parser::parse_yaml;
///
/// let yaml = r#"
/// sheets:
///   default:
///     columns:
///       - name: Verified
///         type: boolean
///         transform: yes_no
///         field: verified
/// "#;
///
/// let definition = parse_yaml(yaml).unwrap();
/// assert_eq!(definition.sheets["default"].columns[0].field, "verified");
/// ```
pub fn parse_yaml(content: &str) -> Result<RegistryDefinition> {
    let definition: RegistryDefinition = serde_yaml_ng::from_str(content)?;
    Ok(definition)
}

/// Parse a registry definition from a TOML string.
///
/// # Example
///
/// ```rust
/// use sheets_parser::parse_toml;
///
/// let toml = r#"
/// [[sheets.default.columns]]
/// name = "Name"
/// type = "string"
/// required = true
/// field = "name"
/// "#;
///
/// let definition = parse_toml(toml).unwrap();
/// assert!(definition.sheets["default"].columns[0].required);
/// ```
pub fn parse_toml(content: &str) -> Result<RegistryDefinition> {
    let definition: RegistryDefinition =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(definition)
}

/// Detect the rule file format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `RulesFormat::Yaml`
/// * `.toml` → `RulesFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<RulesFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(RulesFormat::Yaml),
        "toml" => Ok(RulesFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a registry definition from a file with automatic format detection.
///
/// ```no_run
/// use sheets_parser::parse_file;
/// use std::path::Path;
///
/// let definition = parse_file(Path::new("rules/upload.yml")).unwrap();
/// println!("Loaded {} rule sets", definition.sheets.len());
/// ```
pub fn parse_file(path: &Path) -> Result<RegistryDefinition> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_str(&content, format)
}

fn parse_str(content: &str, format: RulesFormat) -> Result<RegistryDefinition> {
    match format {
        RulesFormat::Yaml => parse_yaml(content),
        RulesFormat::Toml => parse_toml(content),
    }
}

/// Load a rule registry from a file.
///
/// Predicate and transform names are resolved against the built-in catalogue, so
/// a misspelled name, a duplicate column or a missing `default` rule set fail here
/// instead of at validation time.
pub fn load_registry(path: &Path) -> Result<Registry> {
    let definition = parse_file(path)?;
    debug!(
        path = %path.display(),
        rule_sets = definition.sheets.len(),
        "Parsed rule file"
    );
    Ok(Registry::from_definition(&definition)?)
}

/// Load a rule registry from a string in the given format.
pub fn load_registry_str(content: &str, format: RulesFormat) -> Result<Registry> {
    let definition = parse_str(content, format)?;
    Ok(Registry::from_definition(&definition)?)
}
