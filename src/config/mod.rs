//! Configuration module for Accident-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section is optional; a run with no file at all uses the
//! defaults.
//!
//! # Example
//!
//! ```no_run
//! use accident_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Flushing every {} records", config.crawler.batch_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DelayRange, OutputConfig, PolitenessConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{load_config, parse_config, read_config};
pub use validation::validate;
