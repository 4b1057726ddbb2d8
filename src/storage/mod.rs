//! Storage module for persisting harvested records
//!
//! This module handles:
//! - Creating the CSV store with its schema header
//! - Detecting an existing store and resuming appends into it
//! - Appending record batches durably and all-or-nothing

mod csv_sink;
mod traits;

pub use csv_sink::{read_records, CsvSink};
pub use traits::{Sink, StorageError, StorageResult};

