use chrono::Datelike;
use serde::Deserialize;

/// Main configuration structure for Accident-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub politeness: PolitenessConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl range and traversal behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Host the listing and detail addresses are built on
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First year to harvest (inclusive)
    #[serde(rename = "start-year")]
    pub start_year: i32,

    /// Last year to harvest (inclusive)
    #[serde(rename = "end-year")]
    pub end_year: i32,

    /// Number of buffered records that forces a mid-year flush
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Hard cap on listing pages visited for a single year
    #[serde(rename = "max-pages-per-year")]
    pub max_pages_per_year: u32,

    /// Text on a listing page that means the year has no (more) accidents
    #[serde(rename = "no-accidents-marker")]
    pub no_accidents_marker: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://aviation-safety.net".to_string(),
            start_year: 1919,
            end_year: chrono::Utc::now().year(),
            batch_size: 10,
            max_pages_per_year: 500,
            no_accidents_marker: "No accidents found".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Randomized pauses between consecutive requests
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolitenessConfig {
    /// Pause after each accident-detail fetch
    #[serde(rename = "detail-delay")]
    pub detail_delay: DelayRange,

    /// Pause after each listing page
    #[serde(rename = "listing-delay")]
    pub listing_delay: DelayRange,
}

impl Default for PolitenessConfig {
    fn default() -> Self {
        Self {
            detail_delay: DelayRange::new(1000, 3000),
            listing_delay: DelayRange::new(2000, 5000),
        }
    }
}

/// Inclusive millisecond range a pause is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DelayRange {
    #[serde(rename = "min-ms")]
    pub min_ms: u64,

    #[serde(rename = "max-ms")]
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A range that never sleeps
    pub const fn none() -> Self {
        Self::new(0, 0)
    }
}

/// User agent presented to the remote service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV store
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "aviation_accidents.csv".to_string(),
        }
    }
}
