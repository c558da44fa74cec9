use crate::config::ScraperConfig;
use crate::output::CrawlReport;
use crate::stats::{tokenize, CrawlStats};
use crate::url::{extract_authority, host_has_suffix};
use std::collections::HashSet;
use url::Url;

/// Tokens this short or shorter never reach the word-frequency counter
const MAX_IGNORED_WORD_LEN: usize = 2;

/// Records accepted pages into the statistics aggregate
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    stop_words: HashSet<String>,
    subdomain_root: String,
    top_words_count: usize,
}

impl StatsAggregator {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            stop_words: config
                .content
                .stop_words
                .iter()
                .map(|word| word.to_lowercase())
                .collect(),
            subdomain_root: config.scope.subdomain_root.to_lowercase(),
            top_words_count: config.content.top_words_count,
        }
    }

    /// Records one accepted page
    ///
    /// * The total token count competes for the longest page (ties keep the
    ///   earlier page).
    /// * Tokens that are not stop words and longer than two characters are
    ///   added to the word frequencies.
    /// * If the host falls under the subdomain root, the URL is tallied under
    ///   its authority.
    pub fn record(&self, stats: &mut CrawlStats, url: &Url, text: &str) {
        let words = tokenize(text);

        if stats.update_longest_page(url.as_str(), words.len()) {
            tracing::debug!("New longest page: {} ({} words)", url, words.len());
        }

        stats.add_words(words.into_iter().filter(|word| self.keeps_word(word)));

        if let Some(host) = url.host_str() {
            if host_has_suffix(host, &self.subdomain_root) {
                if let Some(authority) = extract_authority(url) {
                    stats.add_subdomain_page(&authority, url.scheme(), url.as_str());
                }
            }
        }
    }

    /// Builds a report from the current state of the aggregate
    pub fn snapshot(&self, stats: &CrawlStats) -> CrawlReport {
        CrawlReport {
            longest_page: stats.longest_page().clone(),
            unique_pages: stats.unique_pages(),
            top_words: stats.top_words(self.top_words_count),
            subdomains: stats.subdomain_counts(),
        }
    }

    fn keeps_word(&self, word: &str) -> bool {
        word.chars().count() > MAX_IGNORED_WORD_LEN && !self.stop_words.contains(word)
    }
}
