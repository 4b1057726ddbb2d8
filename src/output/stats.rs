//! Run statistics
//!
//! Counters collected by the crawl driver while it runs, and a printer for
//! the end-of-run summary.

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Years whose pagination reached Done
    pub years_completed: u64,

    /// Listing pages requested
    pub listing_pages: u64,

    /// Listing pages that ended a year with a transport failure
    pub listing_failures: u64,

    /// Detail pages fetched successfully
    pub details_fetched: u64,

    /// Detail pages that could not be fetched
    pub detail_failures: u64,

    /// Records extracted and buffered
    pub records_extracted: u64,

    /// Detail pages that were fetched but could not be extracted
    pub extraction_failures: u64,

    /// Batches appended to the store
    pub batches_flushed: u64,

    /// Rows appended to the store
    pub records_saved: u64,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total recoverable errors seen during the run
    pub fn total_errors(&self) -> u64 {
        self.listing_failures + self.detail_failures + self.extraction_failures
    }

    /// Share of attempted detail pages that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.details_fetched + self.detail_failures;
        if attempted == 0 {
            return 0.0;
        }
        (self.records_extracted as f64 / attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Traversal:");
    println!("  Years completed: {}", stats.years_completed);
    println!("  Listing pages: {}", stats.listing_pages);
    println!("  Detail pages fetched: {}", stats.details_fetched);
    println!();

    println!("Records:");
    println!("  Extracted: {}", stats.records_extracted);
    println!(
        "  Saved: {} in {} batches",
        stats.records_saved, stats.batches_flushed
    );
    println!("  Success rate: {:.1}%", stats.success_rate());
    println!();

    if stats.total_errors() > 0 {
        println!("Errors ({}):", stats.total_errors());
        println!("  Listing failures: {}", stats.listing_failures);
        println!("  Detail fetch failures: {}", stats.detail_failures);
        println!("  Extraction failures: {}", stats.extraction_failures);
    }
}
