//! Corpus statistics for a crawl run
//!
//! This module handles:
//! - The `CrawlStats` aggregate shared by every worker
//! - Tokenizing page text and filtering stop words
//! - Recording accepted pages and producing report snapshots

mod aggregator;
mod crawl_stats;
mod stop_words;
mod tokenize;

pub use aggregator::StatsAggregator;
pub use crawl_stats::{lock_stats, CrawlStats, LongestPage, SharedStats};
pub use stop_words::STOP_WORDS;
pub use tokenize::{count_tokens, tokenize};
