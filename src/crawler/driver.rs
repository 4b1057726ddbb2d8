//! Crawl driver - main harvest orchestration logic
//!
//! This module contains the top-level loop that:
//! - Walks the configured years in ascending order
//! - Pages through each year's listings with a [`YearPaginator`]
//! - Fetches and extracts every linked accident-detail page
//! - Buffers records and flushes them to the [`Sink`] every `batch_size`
//!   records and at the end of every year
//!
//! Only persistence errors stop a run. Listing failures end the current
//! year, and detail failures skip a single record.

use crate::config::Config;
use crate::crawler::extractor::extract_record;
use crate::crawler::fetcher::{FetchResult, HttpFetcher, PageFetcher};
use crate::crawler::paginator::{
    DoneReason, PageOutcome, PaginatorSettings, PaginatorState, YearPaginator,
};
use crate::crawler::politeness::Politeness;
use crate::output::CrawlStatistics;
use crate::record::Record;
use crate::storage::{CsvSink, Sink};
use crate::HarvestError;
use std::path::Path;
use url::Url;

/// Tunables for one driver
#[derive(Debug, Clone)]
pub struct DriverSettings {
    pub paginator: PaginatorSettings,
    pub batch_size: usize,
    pub politeness: Politeness,
}

impl DriverSettings {
    /// Builds driver settings from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        Ok(Self {
            paginator: PaginatorSettings {
                base_url: Url::parse(&config.crawler.base_url)?,
                no_accidents_marker: config.crawler.no_accidents_marker.clone(),
                max_pages_per_year: config.crawler.max_pages_per_year,
            },
            batch_size: config.crawler.batch_size.max(1),
            politeness: Politeness::new(&config.politeness),
        })
    }
}

/// Main harvest driver
///
/// Owns the fetch capability, the sink and the record buffer for one run.
pub struct CrawlDriver<F, S> {
    fetcher: F,
    sink: S,
    settings: DriverSettings,
    buffer: Vec<Record>,
    stats: CrawlStatistics,
}

impl<F: PageFetcher, S: Sink> CrawlDriver<F, S> {
    pub fn new(fetcher: F, sink: S, settings: DriverSettings) -> Self {
        let buffer = Vec::with_capacity(settings.batch_size);
        Self {
            fetcher,
            sink,
            settings,
            buffer,
            stats: CrawlStatistics::new(),
        }
    }

    /// Harvests every year from `start_year` to `end_year` inclusive
    pub async fn run(&mut self, start_year: i32, end_year: i32) -> Result<(), HarvestError> {
        tracing::info!("Starting harvest of years {}..={}", start_year, end_year);

        for year in start_year..=end_year {
            if year > start_year {
                self.settings.politeness.pause_after_listing().await;
            }
            let extracted = self.scrape_year(year).await?;
            tracing::info!("Year {} complete: {} records", year, extracted);
        }

        tracing::info!(
            "Harvest completed: {} records saved in {} batches",
            self.stats.records_saved,
            self.stats.batches_flushed
        );
        Ok(())
    }

    /// Harvests one year and checkpoints the buffer to the sink
    ///
    /// Returns the number of records extracted for the year.
    pub async fn scrape_year(&mut self, year: i32) -> Result<usize, HarvestError> {
        tracing::info!("Scraping year: {}", year);

        let paginator_settings = self.settings.paginator.clone();
        let mut paginator = YearPaginator::new(year, &paginator_settings);
        let mut extracted = 0;

        while let (Some(url), Some((_, page))) = (paginator.listing_url(), paginator.cursor()) {
            tracing::info!("Processing {}", url);
            let result = self.fetcher.fetch(&url).await;
            self.stats.listing_pages += 1;

            match paginator.advance(result) {
                PageOutcome::Links(links) => {
                    tracing::info!("Found {} accidents on page {}", links.len(), page);
                    for link in &links {
                        if self.harvest_detail(link).await? {
                            extracted += 1;
                        }
                        self.settings.politeness.pause_after_detail().await;
                    }
                    if !paginator.is_done() {
                        self.settings.politeness.pause_after_listing().await;
                    }
                }
                PageOutcome::Finished(DoneReason::FetchFailed(reason)) => {
                    self.stats.listing_failures += 1;
                    tracing::warn!(
                        "Error processing year {} page {}: {}",
                        year,
                        page,
                        reason
                    );
                }
                PageOutcome::Finished(reason) => {
                    tracing::info!("Year {} ended at page {}: {}", year, page, reason);
                }
            }
        }

        if let PaginatorState::Done {
            reason: DoneReason::PageCapReached,
            ..
        } = paginator.state()
        {
            tracing::warn!(
                "Year {} stopped at the cap of {} pages",
                year,
                paginator_settings.max_pages_per_year
            );
        }

        self.flush()?;
        self.stats.years_completed += 1;
        Ok(extracted)
    }

    /// Fetches and extracts one accident-detail page
    ///
    /// Returns Ok(true) if a record was buffered, Ok(false) if the page was
    /// skipped. Only a failed flush is an error.
    async fn harvest_detail(&mut self, url: &str) -> Result<bool, HarvestError> {
        tracing::debug!("Scraping accident: {}", url);

        let body = match self.fetcher.fetch(url).await {
            FetchResult::Ok { body, .. } => body,
            FetchResult::NotFound => {
                self.stats.detail_failures += 1;
                tracing::warn!("Accident page not found: {}", url);
                return Ok(false);
            }
            FetchResult::Failure { reason } => {
                self.stats.detail_failures += 1;
                tracing::warn!("Error fetching accident {}: {}", url, reason);
                return Ok(false);
            }
        };
        self.stats.details_fetched += 1;

        let record = match extract_record(&body, url) {
            Ok(record) => record,
            Err(e) => {
                self.stats.extraction_failures += 1;
                tracing::warn!("Error scraping accident {}: {}", url, e);
                return Ok(false);
            }
        };

        self.buffer.push(record);
        self.stats.records_extracted += 1;

        if self.buffer.len() >= self.settings.batch_size {
            self.flush()?;
        }
        Ok(true)
    }

    /// Appends the buffered records to the sink and clears the buffer
    fn flush(&mut self) -> Result<(), HarvestError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        self.sink.append(&self.buffer)?;

        let saved = self.buffer.len() as u64;
        self.stats.batches_flushed += 1;
        self.stats.records_saved += saved;
        tracing::info!(
            "Flushed batch {} ({} records, {} total)",
            self.stats.batches_flushed,
            saved,
            self.stats.records_saved
        );

        self.buffer.clear();
        Ok(())
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Records extracted but not yet flushed
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Runs a complete harvest from configuration
///
/// This function:
/// 1. Sets up the HTTP fetch layer (fatal on failure)
/// 2. Initializes or reopens the CSV store
/// 3. Walks every configured year
///
/// # Example
///
/// ```no_run
/// use accident_harvest::config::Config;
/// use accident_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_harvest(&Config::default()).await?;
/// println!("{} records saved", stats.records_saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: &Config) -> Result<CrawlStatistics, HarvestError> {
    let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent)?;
    let sink = CsvSink::initialize(Path::new(&config.output.csv_path))?;
    let settings = DriverSettings::from_config(config)?;

    let mut driver = CrawlDriver::new(fetcher, sink, settings);
    driver
        .run(config.crawler.start_year, config.crawler.end_year)
        .await?;

    Ok(driver.statistics().clone())
}
