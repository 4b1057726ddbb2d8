//! Crawler module for harvesting accident records
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching behind the [`PageFetcher`] capability
//! - Accident link extraction from listing pages
//! - Per-year pagination as an explicit state machine
//! - Field extraction from accident-detail pages
//! - Politeness delays and the overall crawl loop

mod driver;
mod extractor;
mod fetcher;
mod links;
mod paginator;
mod politeness;

pub use driver::{run_harvest, CrawlDriver, DriverSettings};
pub use extractor::{
    extract_record, populate_labeled_fields, HtmlFieldReader, LabeledFieldReader,
};
pub use fetcher::{build_http_client, FetchResult, HttpFetcher, PageFetcher};
pub use links::{extract_links, is_accident_path};
pub use paginator::{
    listing_url, DoneReason, PageOutcome, PaginatorSettings, PaginatorState, YearPaginator,
};
pub use politeness::{sample_delay, Politeness};
