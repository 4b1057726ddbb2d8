//! Randomized pauses between requests
//!
//! The remote service gets at most one outstanding request, and each request
//! is followed by a random pause drawn from a configured range.

use crate::config::{DelayRange, PolitenessConfig};
use rand::Rng;
use std::time::Duration;

/// Pause ranges applied after detail and listing fetches
#[derive(Debug, Clone)]
pub struct Politeness {
    detail: DelayRange,
    listing: DelayRange,
}

impl Politeness {
    pub fn new(config: &PolitenessConfig) -> Self {
        Self {
            detail: config.detail_delay,
            listing: config.listing_delay,
        }
    }

    /// No pauses at all
    pub fn disabled() -> Self {
        Self {
            detail: DelayRange::none(),
            listing: DelayRange::none(),
        }
    }

    /// Pause after fetching an accident-detail page
    pub async fn pause_after_detail(&self) {
        pause(self.detail).await;
    }

    /// Pause after finishing a listing page
    pub async fn pause_after_listing(&self) {
        pause(self.listing).await;
    }
}

/// Picks a duration uniformly from the range
pub fn sample_delay(range: DelayRange) -> Duration {
    if range.max_ms == 0 {
        return Duration::ZERO;
    }
    let (low, high) = if range.min_ms <= range.max_ms {
        (range.min_ms, range.max_ms)
    } else {
        (range.max_ms, range.min_ms)
    };
    Duration::from_millis(rand::rng().random_range(low..=high))
}

async fn pause(range: DelayRange) {
    let delay = sample_delay(range);
    if !delay.is_zero() {
        tracing::trace!("Sleeping {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}
