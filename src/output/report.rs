//! Report snapshot and its text formats

use crate::stats::LongestPage;

/// Snapshot of the crawl statistics at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Page with the most tokens so far
    pub longest_page: LongestPage,

    /// Number of distinct accepted URLs
    pub unique_pages: usize,

    /// Most frequent words, descending by count
    pub top_words: Vec<(String, u64)>,

    /// `({scheme}://{authority}, url_count)`, ascending by authority
    pub subdomains: Vec<(String, usize)>,
}

/// Formats the longest-page report
///
/// # Example
///
/// ```
/// use sumi_sieve::output::{format_longest_page, CrawlReport};
///
/// let report = CrawlReport::default();
/// assert_eq!(format_longest_page(&report), "Longest Page:  with 0 words\n");
/// ```
pub fn format_longest_page(report: &CrawlReport) -> String {
    format!(
        "Longest Page: {} with {} words\n",
        report.longest_page.url, report.longest_page.word_count
    )
}

/// Formats the uniqueness report
pub fn format_unique_pages(report: &CrawlReport) -> String {
    format!("Total Unique Pages: {}\n", report.unique_pages)
}

/// Formats the word-frequency report
pub fn format_common_words(report: &CrawlReport) -> String {
    let mut out = String::from("Most Common Words:\n");
    for (word, count) in &report.top_words {
        out.push_str(&format!("{}: {}\n", word, count));
    }
    out
}

/// Formats the subdomain report
pub fn format_subdomains(report: &CrawlReport) -> String {
    let mut out = String::new();
    for (origin, count) in &report.subdomains {
        out.push_str(&format!("{}, {}\n", origin, count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CrawlReport {
        CrawlReport {
            longest_page: LongestPage {
                url: "https://www.ics.uci.edu/about".to_string(),
                word_count: 5120,
            },
            unique_pages: 42,
            top_words: vec![("research".to_string(), 90), ("students".to_string(), 75)],
            subdomains: vec![
                ("https://archive.ics.uci.edu".to_string(), 3),
                ("http://vision.ics.uci.edu".to_string(), 12),
            ],
        }
    }

    #[test]
    fn test_format_longest_page() {
        assert_eq!(
            format_longest_page(&sample_report()),
            "Longest Page: https://www.ics.uci.edu/about with 5120 words\n"
        );
    }

    #[test]
    fn test_format_unique_pages() {
        assert_eq!(
            format_unique_pages(&sample_report()),
            "Total Unique Pages: 42\n"
        );
    }

    #[test]
    fn test_format_common_words() {
        assert_eq!(
            format_common_words(&sample_report()),
            "Most Common Words:\nresearch: 90\nstudents: 75\n"
        );
        assert_eq!(
            format_common_words(&CrawlReport::default()),
            "Most Common Words:\n"
        );
    }

    #[test]
    fn test_format_subdomains() {
        assert_eq!(
            format_subdomains(&sample_report()),
            "https://archive.ics.uci.edu, 3\nhttp://vision.ics.uci.edu, 12\n"
        );
        assert_eq!(format_subdomains(&CrawlReport::default()), "");
    }
}
