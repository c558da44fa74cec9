//! Link extraction
//!
//! Resolves every anchor on a page against the page URL and keeps only the
//! targets the canonicalizer accepts.

use crate::crawler::parser::{HtmlParser, ScraperParser};
use crate::url::Canonicalizer;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Something that can resolve an href against a base URL
pub trait UrlResolver: Send + Sync {
    /// Returns the absolute URL, or None if the href cannot be resolved
    fn resolve(&self, base: &Url, href: &str) -> Option<Url>;
}

/// Standard relative-reference resolution (RFC 3986) via `url::Url::join`
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardResolver;

impl UrlResolver for StandardResolver {
    fn resolve(&self, base: &Url, href: &str) -> Option<Url> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        base.join(href).ok()
    }
}

/// Extracts in-scope links from HTML pages
#[derive(Clone)]
pub struct LinkExtractor {
    canonicalizer: Canonicalizer,
    parser: Arc<dyn HtmlParser>,
    resolver: Arc<dyn UrlResolver>,
}

impl LinkExtractor {
    /// Creates an extractor with the default parser and resolver
    pub fn new(canonicalizer: Canonicalizer) -> Self {
        Self {
            canonicalizer,
            parser: Arc::new(ScraperParser::new()),
            resolver: Arc::new(StandardResolver),
        }
    }

    /// Replaces the HTML parser
    pub fn with_parser(mut self, parser: Arc<dyn HtmlParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Replaces the URL resolver
    pub fn with_resolver(mut self, resolver: Arc<dyn UrlResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// The parser this extractor uses
    pub fn parser(&self) -> &dyn HtmlParser {
        self.parser.as_ref()
    }

    /// Parses `html` and returns the set of canonical, in-scope link targets
    ///
    /// Content that cannot be parsed yields an empty set.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_sieve::config::ScopeConfig;
    /// use sumi_sieve::crawler::LinkExtractor;
    /// use sumi_sieve::url::Canonicalizer;
    /// use url::Url;
    ///
    /// let extractor = LinkExtractor::new(Canonicalizer::new(&ScopeConfig::default()).unwrap());
    /// let base = Url::parse("https://www.ics.uci.edu/about/").unwrap();
    /// let html = br#"<a href="people#faculty">People</a><a href="https://example.com/">Out</a>"#;
    ///
    /// let links = extractor.extract_links(&base, html);
    /// assert_eq!(links.len(), 1);
    /// assert!(links.contains("https://www.ics.uci.edu/about/people"));
    /// ```
    pub fn extract_links(&self, base: &Url, html: &[u8]) -> HashSet<String> {
        match self.parser.parse(html) {
            Ok(document) => self.filter_links(base, &document.hrefs),
            Err(e) => {
                tracing::debug!("No links extracted from {}: {}", base, e);
                HashSet::new()
            }
        }
    }

    /// Resolves and filters raw href values already pulled from a document
    pub fn filter_links<S: AsRef<str>>(&self, base: &Url, hrefs: &[S]) -> HashSet<String> {
        hrefs
            .iter()
            .filter_map(|href| self.resolve_link(base, href.as_ref()))
            .collect()
    }

    /// Resolves one href and applies the crawl scope
    ///
    /// Returns None if the link should be dropped.
    fn resolve_link(&self, base: &Url, href: &str) -> Option<String> {
        let absolute = self.resolver.resolve(base, href)?;

        match self.canonicalizer.check(absolute) {
            Ok(url) => Some(url.into()),
            Err(e) => {
                tracing::trace!("Dropping link {} from {}: {}", href, base, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for LinkExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkExtractor")
            .field("canonicalizer", &self.canonicalizer)
            .finish_non_exhaustive()
    }
}
