//! HTML parsing for page text and anchors
//!
//! Parsing is a pluggable capability: the page processor and link extractor
//! only see the `HtmlParser` trait, so their filtering rules can be tested with
//! any parser. `ScraperParser` is the default, built on the `scraper` crate.

use crate::ContentError;
use scraper::{Html, Node, Selector};

/// How many leading bytes are inspected when sniffing for binary content
const BINARY_SNIFF_LEN: usize = 1024;

/// Elements whose text is never part of the page's readable content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Text and raw anchor targets extracted from one HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Readable text, one space between text nodes
    pub text: String,

    /// Raw `href` values of anchor-like elements, in document order
    pub hrefs: Vec<String>,
}

/// Something that can turn page bytes into text and anchor targets
pub trait HtmlParser: Send + Sync {
    /// Parses page content
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedDocument)` - Whatever text and anchors could be recovered
    /// * `Err(ContentError::ParseFailure)` - The content is not HTML at all
    fn parse(&self, content: &[u8]) -> Result<ParsedDocument, ContentError>;
}

/// Lenient HTML5 parser backed by `scraper`
///
/// Malformed markup never fails; the parser recovers the same way a browser
/// would and returns whatever anchors it finds. Invalid UTF-8 is replaced
/// rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperParser;

impl ScraperParser {
    pub fn new() -> Self {
        Self
    }
}

impl HtmlParser for ScraperParser {
    fn parse(&self, content: &[u8]) -> Result<ParsedDocument, ContentError> {
        if looks_binary(content) {
            return Err(ContentError::ParseFailure(
                "content contains NUL bytes".to_string(),
            ));
        }

        let html = String::from_utf8_lossy(content);
        let document = Html::parse_document(&html);

        Ok(ParsedDocument {
            text: extract_text(&document),
            hrefs: extract_hrefs(&document),
        })
    }
}

/// Collects all readable text nodes, skipping script and style bodies
fn extract_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let inside_non_content = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map(|element| NON_CONTENT_ELEMENTS.contains(&element.name()))
            .unwrap_or(false);
        if inside_non_content {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}

/// Collects the raw href of every `<a>` and `<area>` element
fn extract_hrefs(document: &Html) -> Vec<String> {
    let mut hrefs = Vec::new();

    if let Ok(anchor_selector) = Selector::parse("a[href], area[href]") {
        for element in document.select(&anchor_selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    hrefs
}

fn looks_binary(content: &[u8]) -> bool {
    content.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}
