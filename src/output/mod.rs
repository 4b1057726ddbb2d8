//! Output module for run reporting
//!
//! This module handles recording and printing harvest statistics.

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics};
