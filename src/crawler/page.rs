//! The fetched-page record handed over by the fetcher

use crate::ContentError;
use http::header::{HeaderMap, HeaderName, HeaderValue, LOCATION};

/// The raw response object: final URL and body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Final URL reported by the HTTP client; relative links resolve against it
    pub url: String,

    /// Body bytes, possibly empty
    pub content: Vec<u8>,
}

/// One fetched page, as produced by the fetcher
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the response was received from
    pub url: String,

    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HeaderMap,

    /// Raw response, absent when the fetcher got nothing usable
    pub raw: Option<RawResponse>,
}

impl FetchedPage {
    /// Creates a page with no headers and no raw response
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
            headers: HeaderMap::new(),
            raw: None,
        }
    }

    /// Attaches a raw response whose URL is the page URL
    pub fn with_body(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.raw = Some(RawResponse {
            url: self.url.clone(),
            content: content.into(),
        });
        self
    }

    /// Sets the final URL of the raw response, if there is one
    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        if let Some(raw) = self.raw.as_mut() {
            raw.url = final_url.into();
        }
        self
    }

    /// Adds a response header, replacing any previous value
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Body bytes of the page
    ///
    /// # Returns
    ///
    /// * `Ok(&[u8])` - Non-empty body
    /// * `Err(ContentError::EmptyOrDead)` - No raw response, or an empty body
    pub fn body(&self) -> Result<&[u8], ContentError> {
        match &self.raw {
            Some(raw) if !raw.content.is_empty() => Ok(raw.content.as_slice()),
            _ => Err(ContentError::EmptyOrDead),
        }
    }

    /// The `Location` header, if present, valid text and non-blank
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Returns true for 3xx statuses
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_header() {
        let page = FetchedPage::new("https://www.ics.uci.edu/", 301)
            .with_header(LOCATION, HeaderValue::from_static(" /next "));
        assert_eq!(page.location(), Some("/next"));
        assert_eq!(
            page.headers.get("location").and_then(|v| v.to_str().ok()),
            Some(" /next ")
        );

        assert_eq!(FetchedPage::new("https://www.ics.uci.edu/", 301).location(), None);
    }

    #[test]
    fn test_blank_location_ignored() {
        let page = FetchedPage::new("https://www.ics.uci.edu/", 302)
            .with_header(LOCATION, HeaderValue::from_static("   "));
        assert_eq!(page.headers.len(), 1);
        assert_eq!(page.location(), None);
    }

    #[test]
    fn test_opaque_location_ignored() {
        let value = HeaderValue::from_bytes(b"/caf\xE9").unwrap();
        let page = FetchedPage::new("https://www.ics.uci.edu/", 302).with_header(LOCATION, value);
        assert_eq!(page.location(), None);
    }

    #[test]
    fn test_body_states() {
        let page = FetchedPage::new("https://www.ics.uci.edu/", 200);
        assert_eq!(page.body(), Err(ContentError::EmptyOrDead));

        let page = page.with_body(Vec::<u8>::new());
        assert_eq!(page.body(), Err(ContentError::EmptyOrDead));

        let page = FetchedPage::new("https://www.ics.uci.edu/", 200).with_body("<p>hi</p>");
        assert_eq!(page.body(), Ok("<p>hi</p>".as_bytes()));
        assert_eq!(page.raw.unwrap().url, "https://www.ics.uci.edu/");
    }

    #[test]
    fn test_final_url() {
        let page = FetchedPage::new("https://www.ics.uci.edu/a", 200)
            .with_body("<p>hi</p>")
            .with_final_url("https://www.ics.uci.edu/a/");
        assert_eq!(page.raw.unwrap().url, "https://www.ics.uci.edu/a/");

        // Without a raw response there is nothing to update
        let page = FetchedPage::new("https://www.ics.uci.edu/a", 200)
            .with_final_url("https://www.ics.uci.edu/b");
        assert!(page.raw.is_none());
    }

    #[test]
    fn test_is_redirect() {
        assert!(FetchedPage::new("https://a.ics.uci.edu/", 301).is_redirect());
        assert!(FetchedPage::new("https://a.ics.uci.edu/", 399).is_redirect());
        assert!(!FetchedPage::new("https://a.ics.uci.edu/", 200).is_redirect());
        assert!(!FetchedPage::new("https://a.ics.uci.edu/", 400).is_redirect());
    }
}
