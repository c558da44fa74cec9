//! Crawler module for per-page processing
//!
//! This module contains the scraper's decision logic, including:
//! - The fetched-page record handed over by the fetcher
//! - HTML parsing and link extraction
//! - Trap detection and near-duplicate detection
//! - The page processor that ties them to the shared statistics

mod dedup;
mod links;
mod page;
mod parser;
mod processor;
mod trap;

pub use dedup::{normalize_text, DuplicateDetector, Fingerprint};
pub use links::{LinkExtractor, StandardResolver, UrlResolver};
pub use page::{FetchedPage, RawResponse};
pub use parser::{HtmlParser, ParsedDocument, ScraperParser};
pub use processor::{PageOutcome, PageProcessor};
pub use trap::{generalize_path, TrapDetector, DIGIT_PLACEHOLDER};
