//! Spreadsheet input and output for the rule validation engine.
//!
//! This module turns uploaded workbook bytes into decoded sheets, writes accepted
//! records back out as an `.xlsx` file and imports them into a record store in
//! batches.
//!
//! # Example
//!
//! ```no_run
//! use sheets_io::{decode_workbook, WorkbookFormat};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("upload.xlsx")?;
//! let workbook = decode_workbook(&bytes, WorkbookFormat::Xlsx)?;
//!
//! for sheet in workbook.sheets() {
//!     println!("{}: {} rows", sheet.name(), sheet.len());
//! }
//! # Ok(())
//! # }
//! ```

use sheets_core::SheetError;
use thiserror::Error;

mod decode;
mod export;
mod format;
mod import;

pub use decode::{decode_workbook, read_workbook};
pub use export::{export_records, DEFAULT_EXPORT_SHEET};
pub use format::WorkbookFormat;
pub use import::{
    import_records, ImportSummary, JsonLinesSink, MemorySink, RecordSink, DEFAULT_BATCH_SIZE,
    SHEET_NAME_FIELD,
};

/// Error types specific to spreadsheet input and output.
#[derive(Error, Debug)]
pub enum IoError {
    /// Input could not be decoded as a workbook at all
    #[error("Unreadable input: {0}")]
    Unreadable(String),

    /// File extension is not a supported spreadsheet format
    #[error("Unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),

    /// Writing the export workbook failed
    #[error("Failed to export records: {0}")]
    Export(String),

    /// Writing to the record store failed
    #[error("Failed to write to record store: {0}")]
    Store(String),

    /// Import was requested with no records
    #[error("No valid records to import")]
    NothingToImport,
}

/// Result type alias for spreadsheet I/O operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl From<rust_xlsxwriter::XlsxError> for IoError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        IoError::Export(err.to_string())
    }
}

/// Only undecodable input has a core counterpart; every other error is handed back.
impl TryFrom<IoError> for SheetError {
    type Error = IoError;

    fn try_from(err: IoError) -> std::result::Result<Self, IoError> {
        match err {
            IoError::Unreadable(reason) => Ok(SheetError::UnreadableInput(reason)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IoError::UnsupportedFormat("pdf".to_string());
        assert_eq!(err.to_string(), "Unsupported spreadsheet format: pdf");
        assert_eq!(IoError::NothingToImport.to_string(), "No valid records to import");
    }

    #[test]
    fn test_unreadable_into_sheet_error() {
        let err = SheetError::try_from(IoError::Unreadable("not a zip archive".to_string()))
            .unwrap();
        assert!(matches!(err, SheetError::UnreadableInput(_)));
        assert_eq!(err.to_string(), "Unreadable input: not a zip archive");
    }

    #[test]
    fn test_store_and_import_errors_stay_io_errors() {
        let err = SheetError::try_from(IoError::Store("disk full".to_string())).unwrap_err();
        assert!(matches!(err, IoError::Store(ref reason) if reason == "disk full"));

        let err = SheetError::try_from(IoError::NothingToImport).unwrap_err();
        assert!(matches!(err, IoError::NothingToImport));

        let err = SheetError::try_from(IoError::Export("bad sheet name".to_string())).unwrap_err();
        assert!(matches!(err, IoError::Export(_)));
    }
}
