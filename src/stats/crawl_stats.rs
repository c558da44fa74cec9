//! The crawl-wide statistics aggregate
//!
//! All six collections live in one struct so that a single lock covers every
//! read-modify-write a page triggers.

use crate::crawler::Fingerprint;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Statistics aggregate shared between crawl workers
pub type SharedStats = Arc<Mutex<CrawlStats>>;

/// Locks the shared aggregate
///
/// A worker that panicked mid-page leaves the aggregate usable: every mutation is
/// a single insert or increment, so the data is never half-written.
pub fn lock_stats(stats: &SharedStats) -> MutexGuard<'_, CrawlStats> {
    stats.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The page with the most tokens seen so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongestPage {
    pub url: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Copy)]
struct WordCount {
    count: u64,
    /// Insertion rank, used to break ties in the top-words report
    first_seen: u64,
}

#[derive(Debug, Clone)]
struct SubdomainPages {
    scheme: String,
    urls: HashSet<String>,
}

/// Running statistics for one crawl run
#[derive(Debug, Default)]
pub struct CrawlStats {
    visited_urls: HashSet<String>,
    longest_page: LongestPage,
    word_frequency: HashMap<String, WordCount>,
    next_word_rank: u64,
    subdomain_pages: HashMap<String, SubdomainPages>,
    path_pattern_counts: HashMap<String, u32>,
    content_fingerprints: HashSet<Fingerprint>,
}

impl CrawlStats {
    /// Creates an empty aggregate for a new run
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty aggregate wrapped for sharing between workers
    pub fn shared() -> SharedStats {
        Arc::new(Mutex::new(Self::new()))
    }

    // ===== Visited URLs =====

    /// Returns true if the URL has already been accepted
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited_urls.contains(url)
    }

    /// Adds a URL to the visited set; returns false if it was already present
    pub fn mark_visited(&mut self, url: impl Into<String>) -> bool {
        self.visited_urls.insert(url.into())
    }

    /// Number of distinct accepted URLs
    pub fn unique_pages(&self) -> usize {
        self.visited_urls.len()
    }

    // ===== Longest page =====

    pub fn longest_page(&self) -> &LongestPage {
        &self.longest_page
    }

    /// Replaces the longest page only if `word_count` is strictly greater
    ///
    /// Returns true if the page became the new longest page.
    pub fn update_longest_page(&mut self, url: &str, word_count: usize) -> bool {
        if word_count > self.longest_page.word_count {
            self.longest_page = LongestPage {
                url: url.to_string(),
                word_count,
            };
            true
        } else {
            false
        }
    }

    // ===== Word frequency =====

    /// Increments the count of every word
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            let rank = self.next_word_rank;
            let entry = self
                .word_frequency
                .entry(word.into())
                .or_insert_with(|| WordCount {
                    count: 0,
                    first_seen: rank,
                });
            if entry.count == 0 {
                self.next_word_rank += 1;
            }
            entry.count += 1;
        }
    }

    /// Count recorded for a word (0 if never seen)
    pub fn word_count(&self, word: &str) -> u64 {
        self.word_frequency.get(word).map_or(0, |w| w.count)
    }

    /// Number of distinct words recorded
    pub fn distinct_words(&self) -> usize {
        self.word_frequency.len()
    }

    /// The `n` most frequent words, by descending count
    ///
    /// Words with equal counts keep the order in which they were first recorded.
    /// Only the selected `n` entries are sorted.
    pub fn top_words(&self, n: usize) -> Vec<(String, u64)> {
        if n == 0 {
            return Vec::new();
        }

        let mut words: Vec<(&String, &WordCount)> = self.word_frequency.iter().collect();
        if words.len() > n {
            words.select_nth_unstable_by(n - 1, rank_order);
            words.truncate(n);
        }
        words.sort_unstable_by(rank_order);

        words
            .into_iter()
            .map(|(word, wc)| (word.clone(), wc.count))
            .collect()
    }

    // ===== Subdomains =====

    /// Records a URL under its authority
    pub fn add_subdomain_page(&mut self, authority: &str, scheme: &str, url: &str) {
        self.subdomain_pages
            .entry(authority.to_string())
            .or_insert_with(|| SubdomainPages {
                scheme: scheme.to_string(),
                urls: HashSet::new(),
            })
            .urls
            .insert(url.to_string());
    }

    /// Number of URLs recorded under an authority
    pub fn subdomain_page_count(&self, authority: &str) -> usize {
        self.subdomain_pages
            .get(authority)
            .map_or(0, |entry| entry.urls.len())
    }

    /// `({scheme}://{authority}, url_count)` for each non-empty subdomain,
    /// sorted by authority ascending
    pub fn subdomain_counts(&self) -> Vec<(String, usize)> {
        let mut entries: Vec<(&String, &SubdomainPages)> = self
            .subdomain_pages
            .iter()
            .filter(|(_, entry)| !entry.urls.is_empty())
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        entries
            .into_iter()
            .map(|(authority, entry)| {
                (format!("{}://{}", entry.scheme, authority), entry.urls.len())
            })
            .collect()
    }

    // ===== Trap shapes =====

    /// Increments the sighting count of a path shape and returns the new count
    pub fn increment_pattern(&mut self, shape: &str) -> u32 {
        let count = self.path_pattern_counts.entry(shape.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Sighting count of a path shape
    pub fn pattern_count(&self, shape: &str) -> u32 {
        self.path_pattern_counts.get(shape).copied().unwrap_or(0)
    }

    // ===== Content fingerprints =====

    /// Adds a fingerprint; returns false if it was already present
    pub fn insert_fingerprint(&mut self, fingerprint: Fingerprint) -> bool {
        self.content_fingerprints.insert(fingerprint)
    }

    pub fn has_fingerprint(&self, fingerprint: &Fingerprint) -> bool {
        self.content_fingerprints.contains(fingerprint)
    }

    pub fn fingerprint_count(&self) -> usize {
        self.content_fingerprints.len()
    }
}

/// Higher count first, then earlier first sighting
fn rank_order(a: &(&String, &WordCount), b: &(&String, &WordCount)) -> Ordering {
    b.1.count
        .cmp(&a.1.count)
        .then(a.1.first_seen.cmp(&b.1.first_seen))
}
