//! Spreadsheet format detection.

use crate::{IoError, Result};
use std::fmt;
use std::path::Path;

/// Supported spreadsheet formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkbookFormat {
    /// Office Open XML workbook (.xlsx)
    Xlsx,
    /// Macro-enabled Office Open XML workbook (.xlsm)
    Xlsm,
    /// Binary workbook (.xlsb)
    Xlsb,
    /// Legacy Excel 97-2003 workbook (.xls)
    Xls,
    /// OpenDocument spreadsheet (.ods)
    Ods,
    /// Comma-separated values (.csv)
    Csv,
}

impl WorkbookFormat {
    /// Maps a file extension to a format, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xlsm" => Some(Self::Xlsm),
            "xlsb" => Some(Self::Xlsb),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Detects the format of a file from its extension.
    ///
    /// # Errors
    ///
    /// Returns `IoError::UnsupportedFormat` if the extension is missing or unknown.
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        Self::from_extension(extension).ok_or_else(|| {
            IoError::UnsupportedFormat(if extension.is_empty() {
                path.display().to_string()
            } else {
                extension.to_string()
            })
        })
    }

    /// Returns true for formats with a single implicit sheet.
    pub fn is_delimited(&self) -> bool {
        matches!(self, Self::Csv)
    }
}

impl fmt::Display for WorkbookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Xlsx => "xlsx",
            Self::Xlsm => "xlsm",
            Self::Xlsb => "xlsb",
            Self::Xls => "xls",
            Self::Ods => "ods",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}
