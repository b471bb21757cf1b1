//! Batched import of accepted records into a record store.

use crate::{IoError, Result};
use serde::Serialize;
use sheets_core::{CellValue, Record};
use std::io::Write;
use tracing::{debug, info};

/// Records written per batch unless the caller says otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Key every imported record is tagged with, holding its source sheet.
pub const SHEET_NAME_FIELD: &str = "sheetName";

/// Destination of imported records.
pub trait RecordSink {
    /// Persists one batch of records.
    fn insert_batch(&mut self, batch: &[Record]) -> Result<()>;
}

/// Sink keeping records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<Record>,
    batches: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every record inserted so far.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of batches inserted so far.
    pub fn batches(&self) -> usize {
        self.batches
    }
}

impl RecordSink for MemorySink {
    fn insert_batch(&mut self, batch: &[Record]) -> Result<()> {
        self.records.extend_from_slice(batch);
        self.batches += 1;
        Ok(())
    }
}

/// Sink appending one JSON object per line to a writer.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn insert_batch(&mut self, batch: &[Record]) -> Result<()> {
        for record in batch {
            serde_json::to_writer(&mut self.writer, record)
                .map_err(|e| IoError::Store(e.to_string()))?;
            self.writer
                .write_all(b"\n")
                .map_err(|e| IoError::Store(e.to_string()))?;
        }
        self.writer.flush().map_err(|e| IoError::Store(e.to_string()))
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records written to the sink
    pub imported: usize,
    /// Records handed to the import
    pub total: usize,
}

/// Imports records into `sink` in batches, tagging each with its sheet name.
///
/// A `batch_size` of zero uses [`DEFAULT_BATCH_SIZE`].
///
/// # Errors
///
/// Returns `IoError::NothingToImport` for an empty record list, or the sink's
/// error for the first batch that fails. Batches written before the failure stay
/// written.
pub fn import_records<S>(
    sink: &mut S,
    records: &[Record],
    sheet_name: &str,
    batch_size: usize,
) -> Result<ImportSummary>
where
    S: RecordSink + ?Sized,
{
    if records.is_empty() {
        return Err(IoError::NothingToImport);
    }

    let batch_size = if batch_size == 0 {
        DEFAULT_BATCH_SIZE
    } else {
        batch_size
    };

    let mut imported = 0;
    for (number, chunk) in records.chunks(batch_size).enumerate() {
        let batch: Vec<Record> = chunk
            .iter()
            .map(|record| {
                let mut tagged = record.clone();
                tagged.insert(SHEET_NAME_FIELD.to_string(), CellValue::from(sheet_name));
                tagged
            })
            .collect();

        sink.insert_batch(&batch)?;
        imported += batch.len();
        debug!(sheet = sheet_name, batch = number + 1, size = batch.len(), "Imported batch");
    }

    info!(sheet = sheet_name, imported = imported, "Import complete");
    Ok(ImportSummary {
        imported,
        total: records.len(),
    })
}
