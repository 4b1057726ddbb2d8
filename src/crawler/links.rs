//! Accident link extraction from listing pages
//!
//! A listing page links to many things; only two address shapes denote an
//! accident-detail record:
//! - `/wikibase/<id>` where `<id>` is numeric
//! - `/database/record.php`, with or without a query
//!
//! Everything else (navigation, other hosts, `mailto:` and so on) is ignored.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

const WIKIBASE_PREFIX: &str = "/wikibase/";
const RECORD_PATH: &str = "/database/record.php";

/// Extracts accident-detail addresses from a listing document
///
/// Links are resolved against `base_url`, deduplicated, and returned as
/// absolute URLs in first-seen order. An empty result means the listing
/// has no accidents on it.
///
/// # Example
///
/// ```
/// use accident_harvest::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/wikibase/12">A</a><a href="/about">About</a><a href="/wikibase/12">A</a>"#;
/// let base = Url::parse("https://example.com").unwrap();
/// assert_eq!(extract_links(html, &base), vec!["https://example.com/wikibase/12"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(absolute) = resolve_accident_link(href, base_url) {
            if seen.insert(absolute.clone()) {
                links.push(absolute);
            }
        }
    }

    links
}

/// Resolves a link href and keeps it only if it names an accident record
///
/// Returns None if the link:
/// - is empty or cannot be resolved
/// - points to a different host than `base_url`
/// - matches neither accident address pattern
fn resolve_accident_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let mut url = base_url.join(href).ok()?;
    if url.host_str() != base_url.host_str()
        || url.port_or_known_default() != base_url.port_or_known_default()
    {
        return None;
    }
    url.set_fragment(None);

    if is_accident_path(&url) {
        Some(url.to_string())
    } else {
        None
    }
}

/// Returns true if the URL uses one of the two accident-detail address forms
pub fn is_accident_path(url: &Url) -> bool {
    let path = url.path();

    if let Some(id) = path.strip_prefix(WIKIBASE_PREFIX) {
        let id = id.trim_end_matches('/');
        return !id.is_empty() && id.chars().all(|c| c.is_ascii_digit());
    }

    path == RECORD_PATH
}
