//! Crawler trap detection
//!
//! Calendars, pagination and session parameters generate endless distinct
//! URLs that share one structural shape. Every run of digits in the path is
//! replaced with a placeholder, and a shape seen more than `threshold` times
//! is flagged.

use crate::stats::CrawlStats;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Replacement for each run of digits in a generalized path
pub const DIGIT_PLACEHOLDER: &str = "[digit]";

static DIGIT_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("Invalid digit-run regex"));

/// Returns the path of `url` with each maximal digit run replaced by `[digit]`
///
/// Input that does not parse as an absolute URL is generalized as-is, up to
/// any query or fragment.
///
/// # Examples
///
/// ```
/// use sumi_sieve::crawler::generalize_path;
///
/// assert_eq!(
///     generalize_path("https://www.ics.uci.edu/item/123/page/4?sort=2"),
///     "/item/[digit]/page/[digit]"
/// );
/// ```
pub fn generalize_path(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    DIGIT_RUN_REGEX
        .replace_all(&path, DIGIT_PLACEHOLDER)
        .into_owned()
}

/// Flags URLs whose path shape repeats too often
#[derive(Debug, Clone, Copy)]
pub struct TrapDetector {
    threshold: u32,
}

impl TrapDetector {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Counts one sighting of the URL's shape and reports whether it is a trap
    ///
    /// The count is incremented on every call, including calls that return
    /// true, so once a shape crosses the threshold every later URL of that
    /// shape is flagged.
    pub fn is_trap(&self, stats: &mut CrawlStats, url: &str) -> bool {
        let shape = generalize_path(url);
        let count = stats.increment_pattern(&shape);

        if count == self.threshold.saturating_add(1) {
            tracing::info!(
                "Path shape {} seen {} times, treating as a trap",
                shape,
                count
            );
        }

        count > self.threshold
    }
}
