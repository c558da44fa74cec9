use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_sieve::url::extract_domain;
///
/// let url = Url::parse("https://WWW.ICS.UCI.EDU/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("www.ics.uci.edu".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Extracts the authority (host plus any explicit, non-default port) from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_sieve::url::extract_authority;
///
/// let url = Url::parse("http://vision.ics.uci.edu:8080/a").unwrap();
/// assert_eq!(extract_authority(&url), Some("vision.ics.uci.edu:8080".to_string()));
///
/// let url = Url::parse("https://vision.ics.uci.edu:443/a").unwrap();
/// assert_eq!(extract_authority(&url), Some("vision.ics.uci.edu".to_string()));
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Checks whether a host ends with the given root domain
///
/// Plain suffix test: "ics.uci.edu" matches "ics.uci.edu", "vision.ics.uci.edu"
/// and also "informatics.uci.edu".
pub fn host_has_suffix(host: &str, root: &str) -> bool {
    !root.is_empty() && host.to_lowercase().ends_with(&root.to_lowercase())
}
