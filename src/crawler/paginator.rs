//! Per-year pagination state machine
//!
//! The source publishes no page count, so the end of a year is inferred
//! from what a listing page returns:
//!
//! ```text
//! FetchingPage(year, 1) ──links──▶ FetchingPage(year, 2) ──links──▶ ...
//!        │
//!        ├── 404 ─────────────────▶ Done(NotFound)
//!        ├── "no accidents" text ─▶ Done(NoAccidentsMarker)
//!        ├── zero accident links ─▶ Done(NoLinks)
//!        ├── transport failure ───▶ Done(FetchFailed)
//!        └── page cap reached ────▶ Done(PageCapReached)
//! ```

use crate::crawler::fetcher::FetchResult;
use crate::crawler::links::extract_links;
use std::fmt;
use url::Url;

/// Why a year stopped paginating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoneReason {
    /// The listing page does not exist
    NotFound,

    /// The listing page has no accident links
    NoLinks,

    /// The listing page says there are no accidents
    NoAccidentsMarker,

    /// The listing page could not be fetched
    FetchFailed(String),

    /// The safety cap on pages per year was hit
    PageCapReached,
}

impl fmt::Display for DoneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("page not found"),
            Self::NoLinks => f.write_str("no accident links"),
            Self::NoAccidentsMarker => f.write_str("no-accidents notice"),
            Self::FetchFailed(reason) => write!(f, "fetch failed: {}", reason),
            Self::PageCapReached => f.write_str("page cap reached"),
        }
    }
}

/// Position of the paginator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginatorState {
    /// Next step fetches this listing page
    FetchingPage { year: i32, page: u32 },

    /// The year is exhausted
    Done { year: i32, reason: DoneReason },
}

/// What one listing page produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Accident-detail addresses to harvest before moving on
    Links(Vec<String>),

    /// The year ended on this page
    Finished(DoneReason),
}

/// Static inputs shared by every year
#[derive(Debug, Clone)]
pub struct PaginatorSettings {
    pub base_url: Url,
    pub no_accidents_marker: String,
    pub max_pages_per_year: u32,
}

/// Drives listing pages for a single year
pub struct YearPaginator<'a> {
    settings: &'a PaginatorSettings,
    state: PaginatorState,
}

impl<'a> YearPaginator<'a> {
    /// Starts at page 1 of `year`
    pub fn new(year: i32, settings: &'a PaginatorSettings) -> Self {
        Self {
            settings,
            state: PaginatorState::FetchingPage { year, page: 1 },
        }
    }

    pub fn state(&self) -> &PaginatorState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, PaginatorState::Done { .. })
    }

    /// Current (year, page) cursor, None once done
    pub fn cursor(&self) -> Option<(i32, u32)> {
        match self.state {
            PaginatorState::FetchingPage { year, page } => Some((year, page)),
            PaginatorState::Done { .. } => None,
        }
    }

    /// Address of the listing page to fetch next, None once done
    pub fn listing_url(&self) -> Option<String> {
        self.cursor()
            .map(|(year, page)| listing_url(&self.settings.base_url, year, page))
    }

    /// Applies the result of fetching the current listing page
    ///
    /// Calling this after the paginator is done has no effect and reports
    /// the reason it finished.
    pub fn advance(&mut self, result: FetchResult) -> PageOutcome {
        let (year, page) = match &self.state {
            PaginatorState::FetchingPage { year, page } => (*year, *page),
            PaginatorState::Done { reason, .. } => return PageOutcome::Finished(reason.clone()),
        };

        let body = match result {
            FetchResult::Ok { body, .. } => body,
            FetchResult::NotFound => return self.finish(year, DoneReason::NotFound),
            FetchResult::Failure { reason } => {
                return self.finish(year, DoneReason::FetchFailed(reason))
            }
        };

        if body.contains(&self.settings.no_accidents_marker) {
            return self.finish(year, DoneReason::NoAccidentsMarker);
        }

        let links = extract_links(&body, &self.settings.base_url);
        if links.is_empty() {
            return self.finish(year, DoneReason::NoLinks);
        }

        self.state = if page >= self.settings.max_pages_per_year {
            PaginatorState::Done {
                year,
                reason: DoneReason::PageCapReached,
            }
        } else {
            PaginatorState::FetchingPage {
                year,
                page: page + 1,
            }
        };

        PageOutcome::Links(links)
    }

    fn finish(&mut self, year: i32, reason: DoneReason) -> PageOutcome {
        self.state = PaginatorState::Done {
            year,
            reason: reason.clone(),
        };
        PageOutcome::Finished(reason)
    }
}

/// Renders `{base}/database/year/{year}/{page}`
pub fn listing_url(base_url: &Url, year: i32, page: u32) -> String {
    format!(
        "{}/database/year/{}/{}",
        base_url.as_str().trim_end_matches('/'),
        year,
        page
    )
}
