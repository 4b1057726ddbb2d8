//! CSV implementation of the record sink
//!
//! The store is a UTF-8 CSV file whose first row is the schema header.
//! Batches are serialised in memory and written with a single append so a
//! crash mid-write never leaves a partial batch behind a complete one.

use crate::record::{Field, Record};
use crate::storage::traits::{Sink, StorageError, StorageResult};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// CSV file sink
pub struct CsvSink {
    path: PathBuf,
    rows_written: usize,
}

impl CsvSink {
    /// Opens the store at `path`, creating it with a header row if needed
    ///
    /// An existing non-empty store is left untouched, apart from checking
    /// that its header matches the schema.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(CsvSink)` - Store is ready for appends
    /// * `Err(StorageError)` - The file could not be created or has a foreign header
    pub fn initialize(path: &Path) -> StorageResult<Self> {
        let existing_len = match fs::metadata(path) {
            Ok(metadata) => Some(metadata.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        match existing_len {
            Some(len) if len > 0 => {
                verify_header(path)?;
                tracing::info!(
                    "Found existing store {}, appending new records",
                    path.display()
                );
            }
            _ => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                write_header(path)?;
                tracing::info!("Created store {}", path.display());
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            rows_written: 0,
        })
    }

    /// Rows appended through this handle
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

impl Sink for CsvSink {
    fn append(&mut self, records: &[Record]) -> StorageResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        for record in records {
            writer.write_record(record.to_row())?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| StorageError::Io(e.into_error()))?;

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(&bytes)?;
        file.sync_data()?;

        self.rows_written += records.len();
        tracing::info!(
            "Saved {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn write_header(path: &Path) -> StorageResult<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(Field::header())?;
    let bytes = writer
        .into_inner()
        .map_err(|e| StorageError::Io(e.into_error()))?;

    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    Ok(())
}

fn verify_header(path: &Path) -> StorageResult<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    let headers = reader.headers()?;

    let expected = Field::header();
    if headers.iter().ne(expected.iter().copied()) {
        return Err(StorageError::HeaderMismatch {
            path: path.display().to_string(),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }
    Ok(())
}

/// Reads every record back from a store
///
/// Empty cells come back as absent fields.
pub fn read_records(path: &Path) -> StorageResult<Vec<Record>> {
    verify_header(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() != Field::ALL.len() {
            return Err(StorageError::MalformedRow {
                path: path.display().to_string(),
                row: index + 1,
                message: format!("expected {} cells, got {}", Field::ALL.len(), row.len()),
            });
        }

        let mut record = Record::default();
        for (field, cell) in Field::ALL.iter().zip(row.iter()) {
            let value = (!cell.is_empty()).then(|| cell.to_string());
            record.set(*field, value);
        }
        records.push(record);
    }
    Ok(records)
}
