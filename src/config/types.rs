use crate::config::defaults::*;
use crate::stats::STOP_WORDS;
use serde::Deserialize;

/// Main configuration structure for Sumi-Sieve
///
/// Every section and key is optional; anything omitted falls back to the
/// compiled-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScraperConfig {
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which URLs are inside the crawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Regular expression a URL's host must match
    #[serde(rename = "allowed-domain-pattern")]
    pub allowed_domain_pattern: String,

    /// Path suffixes (lowercase, with leading dot) that are never crawled
    #[serde(rename = "excluded-extensions")]
    pub excluded_extensions: Vec<String>,

    /// Hosts ending with this suffix are counted in the subdomain report
    #[serde(rename = "subdomain-root")]
    pub subdomain_root: String,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allowed_domain_pattern: DEFAULT_ALLOWED_DOMAIN_PATTERN.to_string(),
            excluded_extensions: DEFAULT_EXCLUDED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            subdomain_root: DEFAULT_SUBDOMAIN_ROOT.to_string(),
        }
    }
}

/// Content heuristics and statistics limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Words ignored by the word-frequency counter
    #[serde(rename = "stop-words")]
    pub stop_words: Vec<String>,

    /// Minimum token count for a page to be kept
    #[serde(rename = "min-words-threshold")]
    pub min_words_threshold: usize,

    /// Number of sightings of one path shape before it is flagged as a trap
    #[serde(rename = "trap-threshold")]
    pub trap_threshold: u32,

    /// Number of entries in the word-frequency report
    #[serde(rename = "top-words-count")]
    pub top_words_count: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|word| word.to_string()).collect(),
            min_words_threshold: DEFAULT_MIN_WORDS_THRESHOLD,
            trap_threshold: DEFAULT_TRAP_THRESHOLD,
            top_words_count: DEFAULT_TOP_WORDS_COUNT,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the running report files are written to
    #[serde(rename = "report-dir")]
    pub report_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: DEFAULT_REPORT_DIR.to_string(),
        }
    }
}
