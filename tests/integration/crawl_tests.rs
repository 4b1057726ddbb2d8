//! Integration tests for the harvester
//!
//! These tests use wiremock to serve listing and detail pages and run the
//! full fetch → extract → CSV cycle end-to-end.

use accident_harvest::config::{Config, DelayRange, PolitenessConfig};
use accident_harvest::crawler::{run_harvest, CrawlDriver, DriverSettings, HttpFetcher};
use accident_harvest::record::Field;
use accident_harvest::storage::{read_records, CsvSink};
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, csv_path: &Path, year: i32) -> Config {
    let mut config = Config::default();
    config.crawler.base_url = base_url.to_string();
    config.crawler.start_year = year;
    config.crawler.end_year = year;
    config.crawler.request_timeout_secs = 5;
    config.politeness = PolitenessConfig {
        detail_delay: DelayRange::none(),
        listing_delay: DelayRange::none(),
    };
    config.output.csv_path = csv_path.to_string_lossy().into_owned();
    config
}

fn listing_page(ids: &[u32]) -> String {
    let rows: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<tr><td><a href="/wikibase/{}">accident {}</a></td></tr>"#,
                id, id
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <a href="/">Home</a>
        <a href="/database/year/2020/2">Next page</a>
        <table class="hp">{}</table>
        </body></html>"#,
        rows
    )
}

fn detail_page(rows: &[(&str, &str)], narrative: Option<&str>) -> String {
    let rows: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<tr><td class="caption">{}</td><td class="caption">{}</td></tr>"#,
                label, value
            )
        })
        .collect();
    let narrative = narrative
        .map(|body| {
            format!(
                r#"<span class="caption">Narrative:</span>{}<div class="captionhr">Sources:</div><a href="https://example.org/report">report</a>"#,
                body
            )
        })
        .unwrap_or_default();
    format!(
        r#"<html><body><div class="innercontent"><table>{}</table>{}</div></body></html>"#,
        rows, narrative
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts the two-accident year 2020 used by several tests
async fn mount_two_accident_year(server: &MockServer) {
    mount_html(server, "/database/year/2020/1", listing_page(&[1001, 1002])).await;

    mount_html(
        server,
        "/wikibase/1001",
        detail_page(
            &[
                ("Date:", "Friday 3 January 2020"),
                ("Type:", "Cessna 172"),
                ("Fatalities:", "Fatalities: 0 / Occupants: 1"),
                ("Location:", "near Springfield"),
            ],
            None,
        ),
    )
    .await;

    mount_html(
        server,
        "/wikibase/1002",
        detail_page(
            &[
                ("Date:", "Monday 9 March 2020"),
                ("Registration:", "G-ABCD"),
                ("Phase:", "En route"),
            ],
            Some("Departed in fog.<br>Lost contact at 0930.<br><em>Wreckage</em> found next day."),
        ),
    )
    .await;
    // Page 2 is not mounted, so the mock server answers 404
}

#[tokio::test]
async fn test_single_year_end_to_end() {
    let server = MockServer::start().await;
    mount_two_accident_year(&server).await;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("accidents.csv");
    let config = create_test_config(&server.uri(), &csv_path, 2020);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.records_saved, 2);
    assert_eq!(stats.batches_flushed, 1);
    assert_eq!(stats.listing_pages, 2);

    let records = read_records(&csv_path).expect("Failed to read store");
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.source_url, format!("{}/wikibase/1001", server.uri()));
    assert_eq!(first.date.as_deref(), Some("Friday 3 January 2020"));
    assert_eq!(first.aircraft_type.as_deref(), Some("Cessna 172"));
    assert_eq!(
        first.fatalities.as_deref(),
        Some("Fatalities: 0 / Occupants: 1")
    );
    assert_eq!(first.narrative, None);

    let second = &records[1];
    assert_eq!(second.source_url, format!("{}/wikibase/1002", server.uri()));
    assert_eq!(second.fatalities, None);
    assert_eq!(second.flight_phase.as_deref(), Some("En route"));
    assert_eq!(
        second.narrative.as_deref(),
        Some("Departed in fog.\nLost contact at 0930.\nWreckage found next day.")
    );
}

#[tokio::test]
async fn test_store_layout() {
    let server = MockServer::start().await;
    mount_two_accident_year(&server).await;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("accidents.csv");
    let config = create_test_config(&server.uri(), &csv_path, 2020);
    run_harvest(&config).await.expect("Harvest failed");

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let header: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    assert_eq!(header, Field::header());

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.len(), 19);
    }
    // Absent fields are present as empty cells
    assert_eq!(&rows[0][1], "");
    assert_eq!(&rows[1][7], "");
}

#[tokio::test]
async fn test_missing_first_page_fetches_no_details() {
    let server = MockServer::start().await;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("accidents.csv");
    let config = create_test_config(&server.uri(), &csv_path, 1930);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.records_saved, 0);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/database/year/1930/1");
    assert!(read_records(&csv_path).unwrap().is_empty());
}

#[tokio::test]
async fn test_five_links_then_not_found() {
    let server = MockServer::start().await;
    let ids = [11, 12, 13, 14, 15];
    mount_html(&server, "/database/year/2020/1", listing_page(&ids)).await;
    for id in ids {
        mount_html(
            &server,
            &format!("/wikibase/{}", id),
            detail_page(&[("Date:", "1 April 2020"), ("Nature:", "Training")], None),
        )
        .await;
    }

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("accidents.csv");
    let config = create_test_config(&server.uri(), &csv_path, 2020);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.records_saved, 5);
    assert_eq!(stats.batches_flushed, 1);
    assert_eq!(read_records(&csv_path).unwrap().len(), 5);
}

#[tokio::test]
async fn test_no_accidents_notice_ends_year() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/database/year/2020/1",
        r#"<html><body><p>No accidents found</p><a href="/wikibase/1">Latest</a></body></html>"#
            .to_string(),
    )
    .await;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("accidents.csv");
    let config = create_test_config(&server.uri(), &csv_path, 2020);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.details_fetched, 0);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_server_error_skips_year_and_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/database/year/2019/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_two_accident_year(&server).await;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("accidents.csv");
    let mut config = create_test_config(&server.uri(), &csv_path, 2020);
    config.crawler.start_year = 2019;

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.listing_failures, 1);
    assert_eq!(stats.years_completed, 2);
    assert_eq!(read_records(&csv_path).unwrap().len(), 2);
}

#[tokio::test]
async fn test_broken_detail_page_is_skipped() {
    let server = MockServer::start().await;
    mount_html(&server, "/database/year/2020/1", listing_page(&[1, 2])).await;
    Mock::given(method("GET"))
        .and(path("/wikibase/1"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    mount_html(
        &server,
        "/wikibase/2",
        detail_page(&[("Date:", "2 February 2020")], None),
    )
    .await;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("accidents.csv");
    let config = create_test_config(&server.uri(), &csv_path, 2020);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.detail_failures, 1);
    let records = read_records(&csv_path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_url, format!("{}/wikibase/2", server.uri()));
}

#[tokio::test]
async fn test_restart_appends_to_existing_store() {
    let server = MockServer::start().await;
    mount_two_accident_year(&server).await;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("accidents.csv");
    let config = create_test_config(&server.uri(), &csv_path, 2020);

    run_harvest(&config).await.expect("First harvest failed");
    run_harvest(&config).await.expect("Second harvest failed");

    // No deduplication across runs; the header is written once
    let records = read_records(&csv_path).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0], records[2]);
    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.matches("SourceURL").count(), 1);
}

#[tokio::test]
async fn test_driver_with_small_batches() {
    let server = MockServer::start().await;
    mount_two_accident_year(&server).await;

    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("accidents.csv");
    let mut config = create_test_config(&server.uri(), &csv_path, 2020);
    config.crawler.batch_size = 1;

    let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent).unwrap();
    let sink = CsvSink::initialize(&csv_path).unwrap();
    let settings = DriverSettings::from_config(&config).unwrap();
    let mut driver = CrawlDriver::new(fetcher, sink, settings);

    driver.run(2020, 2020).await.expect("Harvest failed");

    assert_eq!(driver.statistics().batches_flushed, 2);
    assert_eq!(driver.sink().rows_written(), 2);
    assert_eq!(read_records(&csv_path).unwrap().len(), 2);
}
