use crate::config::ScopeConfig;
use crate::url::extract_domain;
use crate::{ConfigError, UrlError};
use regex::Regex;
use url::Url;

/// Validates URLs against the crawl scope and produces their canonical form
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Remove fragment (everything after #)
/// 3. Reject unless the scheme is `http` or `https`
/// 4. Reject unless the host matches the allowed-domain pattern
/// 5. Reject if the lowercased path ends with an excluded extension
///
/// Scheme, host, path and query are otherwise preserved. The result depends
/// only on the input string and the scope, so canonicalizing a canonical URL
/// returns it unchanged.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    allowed_domains: Regex,
    excluded_extensions: Vec<String>,
}

impl Canonicalizer {
    /// Builds a canonicalizer from the scope configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Canonicalizer)` - Ready to validate URLs
    /// * `Err(ConfigError)` - The allowed-domain pattern does not compile
    pub fn new(scope: &ScopeConfig) -> Result<Self, ConfigError> {
        let allowed_domains = Regex::new(&scope.allowed_domain_pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!(
                "allowed_domain_pattern '{}' does not compile: {}",
                scope.allowed_domain_pattern, e
            ))
        })?;

        Ok(Self {
            allowed_domains,
            excluded_extensions: scope
                .excluded_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        })
    }

    /// Canonicalizes a raw URL string
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_sieve::config::ScopeConfig;
    /// use sumi_sieve::url::Canonicalizer;
    ///
    /// let canonicalizer = Canonicalizer::new(&ScopeConfig::default()).unwrap();
    /// let url = canonicalizer
    ///     .canonicalize("https://www.ics.uci.edu/about#staff")
    ///     .unwrap();
    /// assert_eq!(url, "https://www.ics.uci.edu/about");
    ///
    /// assert!(canonicalizer.canonicalize("https://example.com/").is_err());
    /// ```
    pub fn canonicalize(&self, raw: &str) -> Result<String, UrlError> {
        self.canonicalize_url(raw).map(String::from)
    }

    /// Canonicalizes a raw URL string, returning the parsed form
    pub fn canonicalize_url(&self, raw: &str) -> Result<Url, UrlError> {
        let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
        self.check(url)
    }

    /// Applies the scope rules to an already-parsed URL
    pub fn check(&self, mut url: Url) -> Result<Url, UrlError> {
        url.set_fragment(None);

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = extract_domain(&url).ok_or(UrlError::MissingDomain)?;
        if !self.allowed_domains.is_match(&host) {
            return Err(UrlError::OutOfScope(host));
        }

        let path = url.path().to_lowercase();
        if let Some(ext) = self
            .excluded_extensions
            .iter()
            .find(|ext| path.ends_with(ext.as_str()))
        {
            return Err(UrlError::ExcludedExtension(ext.clone()));
        }

        Ok(url)
    }

    /// Returns true if the URL is inside the crawl scope
    pub fn is_valid(&self, raw: &str) -> bool {
        self.canonicalize(raw).is_ok()
    }
}
