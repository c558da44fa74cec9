//! URL handling module for Sumi-Sieve
//!
//! This module provides crawl-scope canonicalization and authority helpers.

mod canonicalize;
mod domain;

// Re-export main types and functions
pub use canonicalize::Canonicalizer;
pub use domain::{extract_authority, extract_domain, host_has_suffix};
