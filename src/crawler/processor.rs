//! Page processor - per-page decision pipeline
//!
//! For each fetched page this module:
//! - Skips pages already accepted, trap-shaped URLs, dead and thin pages
//! - Resolves redirects to the effective URL and records it as visited
//! - Skips pages whose normalized text was already seen
//! - Records statistics and hands a report snapshot to the background writer
//! - Returns the in-scope links found on pages served with status 200

use crate::config::{validate, ScraperConfig};
use crate::crawler::dedup::DuplicateDetector;
use crate::crawler::links::{LinkExtractor, UrlResolver};
use crate::crawler::page::FetchedPage;
use crate::crawler::parser::{HtmlParser, ParsedDocument};
use crate::crawler::trap::TrapDetector;
use crate::output::{BackgroundReportWriter, CrawlReport, FileReportWriter, ReportSink};
use crate::stats::{count_tokens, lock_stats, CrawlStats, SharedStats, StatsAggregator};
use crate::url::Canonicalizer;
use crate::SieveError;
use std::sync::Arc;
use url::Url;

/// Terminal result of processing one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The URL was accepted earlier in the run
    AlreadyVisited,

    /// The URL's path shape crossed the trap threshold
    Trap,

    /// No content bytes were delivered
    Dead,

    /// Fewer tokens than the minimum word threshold
    LowInformation { words: usize },

    /// Same normalized text as a page accepted earlier
    Duplicate { effective_url: String },

    /// The page was kept; `links` are the canonical URLs to visit next
    Accepted {
        effective_url: String,
        links: Vec<String>,
    },
}

impl PageOutcome {
    /// Links to enqueue; empty for every outcome except `Accepted`
    pub fn links(&self) -> &[String] {
        match self {
            Self::Accepted { links, .. } => links,
            _ => &[],
        }
    }

    pub fn into_links(self) -> Vec<String> {
        match self {
            Self::Accepted { links, .. } => links,
            _ => Vec::new(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Processes fetched pages against one crawl run's statistics
///
/// A processor is created at the start of a run and finalized at its end.
/// It is `Send + Sync`; workers share it behind an `Arc` and call
/// [`PageProcessor::process`] concurrently.
#[derive(Debug)]
pub struct PageProcessor {
    config: ScraperConfig,
    canonicalizer: Canonicalizer,
    extractor: LinkExtractor,
    traps: TrapDetector,
    duplicates: DuplicateDetector,
    aggregator: StatsAggregator,
    stats: SharedStats,
    reports: BackgroundReportWriter,
}

impl PageProcessor {
    /// Starts a run that writes its report files to `config.output.report_dir`
    ///
    /// # Returns
    ///
    /// * `Ok(PageProcessor)` - Fresh statistics, writer thread running
    /// * `Err(SieveError)` - Invalid configuration, or the writer could not start
    pub fn new(config: ScraperConfig) -> Result<Self, SieveError> {
        let sink = FileReportWriter::new(&config.output.report_dir);
        Self::with_sink(config, sink)
    }

    /// Starts a run that hands report snapshots to a custom sink
    pub fn with_sink<S: ReportSink + 'static>(
        config: ScraperConfig,
        sink: S,
    ) -> Result<Self, SieveError> {
        validate(&config)?;

        let canonicalizer = Canonicalizer::new(&config.scope)?;
        let extractor = LinkExtractor::new(canonicalizer.clone());
        let traps = TrapDetector::new(config.content.trap_threshold);
        let aggregator = StatsAggregator::new(&config);
        let reports = BackgroundReportWriter::spawn(sink)?;

        tracing::info!(
            "Starting run (trap threshold {}, minimum {} words)",
            config.content.trap_threshold,
            config.content.min_words_threshold
        );

        Ok(Self {
            config,
            canonicalizer,
            extractor,
            traps,
            duplicates: DuplicateDetector::new(),
            aggregator,
            stats: CrawlStats::shared(),
            reports,
        })
    }

    /// Replaces the HTML parser
    pub fn with_parser(mut self, parser: Arc<dyn HtmlParser>) -> Self {
        self.extractor = self.extractor.with_parser(parser);
        self
    }

    /// Replaces the URL resolver used for links
    pub fn with_resolver(mut self, resolver: Arc<dyn UrlResolver>) -> Self {
        self.extractor = self.extractor.with_resolver(resolver);
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Handle to the run's statistics
    pub fn stats(&self) -> SharedStats {
        Arc::clone(&self.stats)
    }

    /// Report built from the current statistics
    pub fn snapshot(&self) -> CrawlReport {
        self.aggregator.snapshot(&lock_stats(&self.stats))
    }

    /// Processes one fetched page and returns the links to visit next
    ///
    /// Equivalent to [`PageProcessor::process`] with the outcome reduced to its
    /// link list. A response URL that cannot be parsed yields no links.
    pub fn scrape(&self, url: &str, page: &FetchedPage) -> Vec<String> {
        match self.process(url, page) {
            Ok(outcome) => outcome.into_links(),
            Err(e) => {
                tracing::warn!("Dropping page {}: {}", url, e);
                Vec::new()
            }
        }
    }

    /// Runs the decision pipeline for one page
    ///
    /// `url` is the URL the page was requested as; `page` is the fetcher's
    /// response. Only a response URL that is not an absolute URL produces an
    /// error; every other problem ends in a skip outcome.
    pub fn process(&self, url: &str, page: &FetchedPage) -> Result<PageOutcome, SieveError> {
        let requested = visited_key(url);

        // Cheap early exit; repeated under the lock below
        if lock_stats(&self.stats).is_visited(&requested) {
            tracing::debug!("Already visited {}, skipping", requested);
            return Ok(PageOutcome::AlreadyVisited);
        }

        // Text-bound work stays outside the lock
        let document = self.parse_content(page);
        let words = document.as_ref().map_or(0, |doc| count_tokens(&doc.text));
        let effective = self.effective_url(page);

        let effective_url = {
            let mut stats = lock_stats(&self.stats);

            if stats.is_visited(&requested) {
                tracing::debug!("Already visited {}, skipping", requested);
                return Ok(PageOutcome::AlreadyVisited);
            }

            if self.traps.is_trap(&mut stats, url) {
                tracing::debug!("Trap detected for URL {}, skipping", url);
                return Ok(PageOutcome::Trap);
            }

            let Some(document) = document.as_ref() else {
                tracing::debug!("No content for URL {} (status {}), skipping", url, page.status);
                return Ok(PageOutcome::Dead);
            };

            if words < self.config.content.min_words_threshold {
                tracing::debug!("Only {} words at URL {}, skipping", words, url);
                return Ok(PageOutcome::LowInformation { words });
            }

            let effective = effective?;
            stats.mark_visited(effective.as_str());

            if self.duplicates.is_duplicate(&mut stats, &document.text) {
                tracing::info!("Similar content detected for URL {}, skipping", effective);
                return Ok(PageOutcome::Duplicate {
                    effective_url: effective.into(),
                });
            }

            if page.status == 200 {
                self.aggregator.record(&mut stats, &effective, &document.text);

                // Submitted under the lock so snapshots reach the writer in order
                if let Err(e) = self.reports.submit(self.aggregator.snapshot(&stats)) {
                    tracing::warn!("Could not queue crawl report: {}", e);
                }
            }

            effective
        };

        // Error and redirect bodies are recorded but never feed the frontier
        if page.status != 200 {
            tracing::info!(
                "Accepted {} with status {}, not following its links",
                effective_url,
                page.status
            );
            return Ok(PageOutcome::Accepted {
                effective_url: effective_url.into(),
                links: Vec::new(),
            });
        }

        let base = link_base(page, &effective_url);
        let hrefs = document.map(|doc| doc.hrefs).unwrap_or_default();
        let mut links: Vec<String> = self
            .extractor
            .filter_links(&base, &hrefs)
            .into_iter()
            .filter(|link| self.canonicalizer.is_valid(link))
            .collect();
        links.sort();

        tracing::info!(
            "Accepted {} ({} words, {} links)",
            effective_url,
            words,
            links.len()
        );

        Ok(PageOutcome::Accepted {
            effective_url: effective_url.into(),
            links,
        })
    }

    /// Writes the final report and stops the writer thread
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The final report, as written
    /// * `Err(SieveError)` - The final write failed
    pub fn finalize(self) -> Result<CrawlReport, SieveError> {
        let report = self.snapshot();
        self.reports.submit(report.clone())?;
        let writes = self.reports.finish()?;

        tracing::info!(
            "Run finished: {} unique pages, {} report writes",
            report.unique_pages,
            writes
        );

        Ok(report)
    }

    /// Parses the page body, or returns None for dead pages
    ///
    /// Content that fails to parse counts as a page without text or links.
    fn parse_content(&self, page: &FetchedPage) -> Option<ParsedDocument> {
        let body = page.body().ok()?;

        match self.extractor.parser().parse(body) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::debug!("Treating {} as empty: {}", page.url, e);
                Some(ParsedDocument::default())
            }
        }
    }

    /// The URL a page's content belongs to
    ///
    /// For a 3xx response with a `Location` header, the target resolved against
    /// the response URL; otherwise the response URL. Fragments are dropped.
    fn effective_url(&self, page: &FetchedPage) -> Result<Url, SieveError> {
        let mut response_url = Url::parse(&page.url).map_err(|source| SieveError::InvalidPageUrl {
            url: page.url.clone(),
            source,
        })?;
        response_url.set_fragment(None);

        if page.is_redirect() {
            if let Some(location) = page.location() {
                match response_url.join(location) {
                    Ok(mut target) => {
                        target.set_fragment(None);
                        tracing::debug!("Redirect {} -> {}", response_url, target);
                        return Ok(target);
                    }
                    Err(e) => {
                        tracing::debug!("Ignoring bad Location '{}': {}", location, e);
                    }
                }
            }
        }

        Ok(response_url)
    }
}

/// Base URL for resolving a page's links
///
/// The final URL reported in the raw response, falling back to the effective
/// URL when it is missing or unparseable.
fn link_base(page: &FetchedPage, effective: &Url) -> Url {
    page.raw
        .as_ref()
        .and_then(|raw| Url::parse(&raw.url).ok())
        .unwrap_or_else(|| effective.clone())
}

/// Identity key for the visited set: the URL without its fragment
fn visited_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.into()
        }
        Err(_) => url.to_string(),
    }
}
