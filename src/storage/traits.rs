//! Sink trait and error types
//!
//! This module defines the trait interface for record sinks and the
//! associated error types.

use crate::record::Record;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Header of {path} does not match the record schema (found: {found})")]
    HeaderMismatch { path: String, found: String },

    #[error("Malformed row {row} in {path}: {message}")]
    MalformedRow {
        path: String,
        row: usize,
        message: String,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Append-only destination for batches of records
///
/// Implementations must persist a batch completely or not at all, and must
/// write rows in the fixed schema order established when the store was
/// created.
pub trait Sink {
    /// Appends a batch of records
    ///
    /// # Arguments
    ///
    /// * `records` - The batch, in the order the rows should appear
    ///
    /// Returns once the batch is durable. An empty batch is a no-op.
    fn append(&mut self, records: &[Record]) -> StorageResult<()>;
}
