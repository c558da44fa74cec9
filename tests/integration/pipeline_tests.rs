//! Integration tests for the page-processing pipeline
//!
//! These tests drive `PageProcessor` with hand-built fetched pages and check
//! the returned links, the shared statistics and the report files on disk.

use http::header::{HeaderValue, LOCATION};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use sumi_sieve::config::{load_config, ScraperConfig};
use sumi_sieve::crawler::{FetchedPage, PageOutcome, PageProcessor};
use sumi_sieve::output::{
    COMMON_WORDS_FILE, LONGEST_PAGE_FILE, SUBDOMAINS_FILE, UNIQUE_PAGES_FILE,
};
use sumi_sieve::stats::lock_stats;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber once; later calls are no-ops
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sumi_sieve=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Default configuration with reports written into `dir`
fn config_in(dir: &Path) -> ScraperConfig {
    let mut config = ScraperConfig::default();
    config.output.report_dir = dir.to_string_lossy().into_owned();
    config
}

/// Creates a processor that writes its reports into `dir`
fn create_processor(dir: &Path) -> PageProcessor {
    init_tracing();
    PageProcessor::new(config_in(dir)).expect("Failed to create processor")
}

/// Like `create_processor`, for tests that fetch many URLs of one path shape
fn create_trap_tolerant_processor(dir: &Path) -> PageProcessor {
    init_tracing();
    let mut config = config_in(dir);
    config.content.trap_threshold = 1_000;
    PageProcessor::new(config).expect("Failed to create processor")
}

/// `count` distinct words built from `seed`
fn filler(count: usize, seed: &str) -> String {
    (0..count)
        .map(|i| format!("{}{}", seed, i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn html_page(url: &str, body: &str) -> FetchedPage {
    FetchedPage::new(url, 200).with_body(format!(
        "<html><head><title>Test</title></head><body>{}</body></html>",
        body
    ))
}

fn read_report(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("Failed to read report file")
}

#[test]
fn test_png_link_dropped() {
    let dir = TempDir::new().unwrap();
    let processor = create_processor(dir.path());

    let url = "https://www.ics.uci.edu/about/";
    let body = format!(
        r#"<p>Hello world, this is a sufficiently long test page. {}</p>
        <a href="/research/">Research</a>
        <a href="/images/logo.png">Logo</a>"#,
        filler(110, "word")
    );

    let links = processor.scrape(url, &html_page(url, &body));
    assert_eq!(links, vec!["https://www.ics.uci.edu/research/".to_string()]);
}

#[test]
fn test_same_content_under_new_url_is_duplicate() {
    let dir = TempDir::new().unwrap();
    let processor = create_processor(dir.path());

    let body = format!(
        r#"<p>{}</p><a href="/next">Next</a>"#,
        filler(120, "shared")
    );

    let first = "https://www.ics.uci.edu/one";
    let links = processor.scrape(first, &html_page(first, &body));
    assert_eq!(links, vec!["https://www.ics.uci.edu/next".to_string()]);

    let second = "https://www.cs.uci.edu/two";
    let links = processor.scrape(second, &html_page(second, &body));
    assert!(links.is_empty());

    let stats = processor.stats();
    let stats = lock_stats(&stats);
    assert_eq!(stats.fingerprint_count(), 1);
    assert_eq!(stats.longest_page().url, first);
}

#[test]
fn test_empty_body_leaves_stats_untouched() {
    let dir = TempDir::new().unwrap();
    let processor = create_processor(dir.path());

    let url = "https://www.ics.uci.edu/empty";
    let page = FetchedPage::new(url, 200).with_body(Vec::<u8>::new());
    let links = processor.scrape(url, &page);
    assert!(links.is_empty());

    let report = processor.snapshot();
    assert_eq!(report.unique_pages, 0);
    assert_eq!(report.longest_page.word_count, 0);
    assert!(report.top_words.is_empty());
    assert!(report.subdomains.is_empty());
}

#[test]
fn test_calendar_trap() {
    let dir = TempDir::new().unwrap();
    let processor = create_processor(dir.path());

    for year in 2010..2020 {
        let url = format!("https://www.ics.uci.edu/calendar/{}/events", year);
        let body = format!("<p>{}</p>", filler(120, &format!("y{}x", year)));
        let outcome = processor.process(&url, &html_page(&url, &body)).unwrap();
        assert!(outcome.is_accepted(), "year {} should be accepted", year);
    }

    let url = "https://www.ics.uci.edu/calendar/2020/events";
    let body = format!("<p>{}</p>", filler(120, "fresh"));
    assert_eq!(
        processor.process(url, &html_page(url, &body)).unwrap(),
        PageOutcome::Trap
    );
    assert_eq!(lock_stats(&processor.stats()).unique_pages(), 10);
}

#[test]
fn test_redirect_recorded_under_target() {
    let dir = TempDir::new().unwrap();
    let processor = create_processor(dir.path());

    let page = FetchedPage::new("https://www.ics.uci.edu/old", 301)
        .with_header(
            LOCATION,
            HeaderValue::from_static("https://www.informatics.uci.edu/new"),
        )
        .with_body(format!(
            r#"<p>{}</p><a href="people">People</a>"#,
            filler(120, "moved")
        ));

    let outcome = processor
        .process("https://www.ics.uci.edu/old", &page)
        .unwrap();
    assert_eq!(
        outcome,
        PageOutcome::Accepted {
            effective_url: "https://www.informatics.uci.edu/new".to_string(),
            links: Vec::new(),
        }
    );

    // A later fetch of the redirect target is already visited
    let target = "https://www.informatics.uci.edu/new";
    let again = html_page(target, &filler(120, "other"));
    assert_eq!(
        processor.process(target, &again).unwrap(),
        PageOutcome::AlreadyVisited
    );
}

#[test]
fn test_error_pages_do_not_grow_frontier() {
    let dir = TempDir::new().unwrap();
    let processor = create_processor(dir.path());

    let not_found = "https://www.ics.uci.edu/gone";
    let page = FetchedPage::new(not_found, 404).with_body(format!(
        r#"<p>{}</p><a href="/x">x</a>"#,
        filler(120, "missing")
    ));
    assert!(processor.scrape(not_found, &page).is_empty());

    let failed = "https://www.ics.uci.edu/crash";
    let page = FetchedPage::new(failed, 500).with_body(format!(
        r#"<p>{}</p><a href="/y">y</a>"#,
        filler(120, "failure")
    ));
    assert!(processor.scrape(failed, &page).is_empty());

    // Both pages still count as visited
    let report = processor.snapshot();
    assert_eq!(report.unique_pages, 2);
    assert!(report.top_words.is_empty());
}

#[test]
fn test_report_files_after_finalize() {
    let dir = TempDir::new().unwrap();
    let processor = create_processor(dir.path());

    let pages = [
        ("https://www.ics.uci.edu/a", 150),
        ("https://vision.ics.uci.edu/b", 200),
        ("https://vision.ics.uci.edu/c", 120),
        ("https://www.stat.uci.edu/d", 300),
    ];
    for (url, words) in pages {
        let body = format!(
            "<p>{} crawler crawler crawler</p>",
            filler(words, &url[8..11])
        );
        assert!(processor.process(url, &html_page(url, &body)).unwrap().is_accepted());
    }

    let report = processor.finalize().unwrap();
    assert_eq!(report.unique_pages, 4);
    assert_eq!(report.longest_page.url, "https://www.stat.uci.edu/d");
    assert_eq!(report.top_words[0], ("crawler".to_string(), 12));

    let dir = dir.path();
    assert_eq!(
        read_report(dir, LONGEST_PAGE_FILE),
        "Longest Page: https://www.stat.uci.edu/d with 304 words\n"
    );
    assert_eq!(read_report(dir, UNIQUE_PAGES_FILE), "Total Unique Pages: 4\n");
    assert_eq!(
        read_report(dir, SUBDOMAINS_FILE),
        "https://vision.ics.uci.edu, 2\nhttps://www.ics.uci.edu, 1\n"
    );

    let common = read_report(dir, COMMON_WORDS_FILE);
    let mut lines = common.lines();
    assert_eq!(lines.next(), Some("Most Common Words:"));
    assert_eq!(lines.next(), Some("crawler: 12"));
    assert_eq!(common.lines().count(), 1 + report.top_words.len());
}

#[test]
fn test_concurrent_workers() {
    let dir = TempDir::new().unwrap();
    let processor = Arc::new(create_trap_tolerant_processor(dir.path()));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let processor = Arc::clone(&processor);
            std::thread::spawn(move || {
                let mut accepted = 0;
                for page in 0..25 {
                    let url = format!("https://www.ics.uci.edu/w{}/p{}", worker, page);
                    let body = format!("<p>{}</p>", filler(110, &format!("w{}p{}x", worker, page)));
                    if processor.process(&url, &html_page(&url, &body)).unwrap().is_accepted() {
                        accepted += 1;
                    }
                    // Every worker also races on one shared URL
                    let shared = "https://www.ics.uci.edu/shared";
                    let _ = processor.process(shared, &html_page(shared, &filler(110, "shared")));
                }
                accepted
            })
        })
        .collect();

    let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(accepted, 200);

    let processor = Arc::try_unwrap(processor).expect("Workers still hold the processor");
    let report = processor.finalize().unwrap();
    assert_eq!(report.unique_pages, 201);
    assert_eq!(
        read_report(dir.path(), UNIQUE_PAGES_FILE),
        "Total Unique Pages: 201\n"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_processor_inside_async_workers() {
    let dir = TempDir::new().unwrap();
    let processor = Arc::new(create_trap_tolerant_processor(dir.path()));

    let mut tasks = Vec::new();
    for n in 0..20 {
        let processor = Arc::clone(&processor);
        tasks.push(tokio::task::spawn_blocking(move || {
            let url = format!("https://www.cs.uci.edu/courses/cs{}", n);
            let body = format!(
                r#"<p>{}</p><a href="/courses/">All courses</a>"#,
                filler(105, &format!("c{}x", n))
            );
            processor.scrape(&url, &html_page(&url, &body))
        }));
    }

    for task in tasks {
        let links = task.await.unwrap();
        assert_eq!(links, vec!["https://www.cs.uci.edu/courses/".to_string()]);
    }

    assert_eq!(processor.snapshot().unique_pages, 20);
    // No page under the subdomain root
    assert!(processor.snapshot().subdomains.is_empty());
}

#[test]
fn test_config_file_drives_processor() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let report_dir = dir.path().join("reports");
    let config_path = dir.path().join("sieve.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[scope]
allowed-domain-pattern = "^(?:.+\\.)?example\\.org$"
excluded-extensions = [".zip"]
subdomain-root = "example.org"

[content]
min-words-threshold = 5
trap-threshold = 3
top-words-count = 2

[output]
report-dir = "{}"
"#,
            report_dir.display()
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let processor = PageProcessor::new(config).unwrap();

    let url = "https://docs.example.org/guide";
    let page = html_page(
        url,
        r#"<p>alpha alpha alpha beta beta gamma</p>
        <a href="/setup">Setup</a>
        <a href="/bundle.zip">Bundle</a>
        <a href="/report.pdf">Report</a>
        <a href="https://www.ics.uci.edu/">Elsewhere</a>"#,
    );
    let links = processor.scrape(url, &page);
    assert_eq!(
        links,
        vec![
            "https://docs.example.org/report.pdf".to_string(),
            "https://docs.example.org/setup".to_string(),
        ]
    );

    let report = processor.finalize().unwrap();
    assert_eq!(
        report.top_words,
        vec![("alpha".to_string(), 3), ("beta".to_string(), 2)]
    );
    assert_eq!(
        read_report(&report_dir, SUBDOMAINS_FILE),
        "https://docs.example.org, 1\n"
    );
}
