//! Accident-Harvest: an incremental accident-record harvester
//!
//! This crate walks a paginated public accident database year by year,
//! extracts each accident-detail page into a fixed 19-column record, and
//! appends the records to a CSV store in small batches so that an
//! interrupted run never loses more than one batch.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod storage;

use thiserror::Error;

/// Main error type for Accident-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Setup error: {0}")]
    Setup(String),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while turning a detail document into a record
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid source URL {url}: {message}")]
    InvalidSourceUrl { url: String, message: String },

    #[error("Empty document for {url}")]
    EmptyDocument { url: String },

    #[error("No labeled fields found in {url}")]
    NoLabeledFields { url: String },

    #[error("Invalid selector: {0}")]
    Selector(String),
}

/// Result type alias for Accident-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_harvest, CrawlDriver, FetchResult, HttpFetcher, PageFetcher};
pub use record::{Field, Record};
pub use storage::{CsvSink, Sink};
