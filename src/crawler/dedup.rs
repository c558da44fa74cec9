//! Duplicate content detection
//!
//! Exact matching on normalized text: whitespace runs collapse to one space,
//! the ends are trimmed and everything is lowercased before hashing. Pages that
//! differ by a single non-whitespace character are distinct.

use crate::stats::CrawlStats;
use sha2::{Digest, Sha256};
use std::fmt;

/// Collapses whitespace runs to a single space, trims, and lowercases
///
/// # Examples
///
/// ```
/// use sumi_sieve::crawler::normalize_text;
///
/// assert_eq!(normalize_text("  Hello \n\t WORLD  "), "hello world");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// SHA-256 digest of normalized page text
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Normalizes `text` and hashes it
    pub fn of(text: &str) -> Self {
        let normalized = normalize_text(text);
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

/// Remembers the fingerprint of every accepted page
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateDetector;

impl DuplicateDetector {
    pub fn new() -> Self {
        Self
    }

    /// Returns true if identical normalized text was seen before
    ///
    /// A new fingerprint is recorded; a known one is left as is.
    pub fn is_duplicate(&self, stats: &mut CrawlStats, text: &str) -> bool {
        let fingerprint = Fingerprint::of(text);
        let duplicate = !stats.insert_fingerprint(fingerprint);

        if duplicate {
            tracing::debug!("Content fingerprint {} already seen", fingerprint);
        }

        duplicate
    }
}
