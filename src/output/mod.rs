//! Output module for the running crawl report
//!
//! This module handles:
//! - Formatting report snapshots into the four report files
//! - Writing those files to disk
//! - Handing snapshots to a background writer so workers never wait on disk

mod report;
mod writer;

pub use report::{
    format_common_words, format_longest_page, format_subdomains, format_unique_pages, CrawlReport,
};
pub use writer::{
    BackgroundReportWriter, FileReportWriter, ReportSink, COMMON_WORDS_FILE, LONGEST_PAGE_FILE,
    SUBDOMAINS_FILE, UNIQUE_PAGES_FILE,
};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report writer has already shut down")]
    WriterClosed,

    #[error("Report writer thread panicked")]
    WriterPanicked,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
