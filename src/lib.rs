//! Sumi-Sieve: the page-processing core of a focused web crawler
//!
//! Given one already-fetched page at a time, this crate decides whether the page
//! is worth keeping, detects crawler traps and duplicate content, maintains running
//! corpus statistics, and returns the in-scope links to visit next.
//!
//! Fetching, scheduling and politeness live outside this crate.

pub mod config;
pub mod crawler;
pub mod output;
pub mod stats;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    /// The fetcher handed over a response URL that is not an absolute URL.
    #[error("Response URL '{url}' cannot be parsed: {source}")]
    InvalidPageUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
///
/// Every variant means "drop this URL"; none of them abort a crawl.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Domain outside crawl scope: {0}")]
    OutOfScope(String),

    #[error("Excluded file extension: {0}")]
    ExcludedExtension(String),
}

/// Page content errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("Page has no usable content")]
    EmptyOrDead,

    #[error("Failed to parse page content: {0}")]
    ParseFailure(String),
}

/// Result type alias for Sumi-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::ScraperConfig;
pub use crawler::{FetchedPage, PageOutcome, PageProcessor, RawResponse};
pub use output::CrawlReport;
pub use stats::{CrawlStats, SharedStats};
pub use crate::url::Canonicalizer;
