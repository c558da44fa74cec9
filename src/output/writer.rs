//! Report persistence
//!
//! `FileReportWriter` overwrites the four report files on every write.
//! `BackgroundReportWriter` moves those writes onto a dedicated thread: workers
//! hand over a snapshot and return immediately, and when snapshots pile up
//! behind a slow write only the newest one is written.

use crate::output::report::{
    format_common_words, format_longest_page, format_subdomains, format_unique_pages,
};
use crate::output::{CrawlReport, OutputError, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use tokio::sync::mpsc;

pub const LONGEST_PAGE_FILE: &str = "longest_page.txt";
pub const UNIQUE_PAGES_FILE: &str = "unique_pages.txt";
pub const COMMON_WORDS_FILE: &str = "common_words.txt";
pub const SUBDOMAINS_FILE: &str = "subdomains.txt";

/// Destination for report snapshots
pub trait ReportSink: Send {
    /// Persists one snapshot, replacing whatever was written before
    fn write_report(&mut self, report: &CrawlReport) -> OutputResult<()>;
}

/// Writes the report as four text files in one directory
#[derive(Debug, Clone)]
pub struct FileReportWriter {
    dir: PathBuf,
}

impl FileReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for FileReportWriter {
    fn write_report(&mut self, report: &CrawlReport) -> OutputResult<()> {
        fs::create_dir_all(&self.dir)?;

        fs::write(self.dir.join(LONGEST_PAGE_FILE), format_longest_page(report))?;
        fs::write(self.dir.join(UNIQUE_PAGES_FILE), format_unique_pages(report))?;
        fs::write(self.dir.join(COMMON_WORDS_FILE), format_common_words(report))?;
        fs::write(self.dir.join(SUBDOMAINS_FILE), format_subdomains(report))?;

        Ok(())
    }
}

/// Runs a `ReportSink` on its own thread
pub struct BackgroundReportWriter {
    sender: Option<mpsc::UnboundedSender<CrawlReport>>,
    handle: Option<JoinHandle<OutputResult<usize>>>,
}

impl BackgroundReportWriter {
    /// Starts the writer thread
    ///
    /// # Returns
    ///
    /// * `Ok(BackgroundReportWriter)` - Thread is running
    /// * `Err(OutputError)` - The thread could not be spawned
    pub fn spawn<S: ReportSink + 'static>(mut sink: S) -> OutputResult<Self> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<CrawlReport>();

        let handle = std::thread::Builder::new()
            .name("report-writer".to_string())
            .spawn(move || {
                let mut writes = 0;
                let mut last_result = Ok(());

                while let Some(mut report) = receiver.blocking_recv() {
                    // Skip straight to the newest snapshot
                    while let Ok(newer) = receiver.try_recv() {
                        report = newer;
                    }

                    last_result = sink.write_report(&report);
                    match &last_result {
                        Ok(()) => writes += 1,
                        Err(e) => tracing::warn!("Failed to write crawl report: {}", e),
                    }
                }

                last_result.map(|()| writes)
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Hands a snapshot to the writer thread without waiting for the write
    pub fn submit(&self, report: CrawlReport) -> OutputResult<()> {
        self.sender
            .as_ref()
            .ok_or(OutputError::WriterClosed)?
            .send(report)
            .map_err(|_| OutputError::WriterClosed)
    }

    /// Writes any pending snapshot and stops the thread
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of snapshots actually written
    /// * `Err(OutputError)` - The final write failed or the thread panicked
    pub fn finish(mut self) -> OutputResult<usize> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> OutputResult<usize> {
        // Closing the channel ends the writer loop once it is drained
        self.sender.take();

        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| OutputError::WriterPanicked)?,
            None => Err(OutputError::WriterClosed),
        }
    }
}

impl Drop for BackgroundReportWriter {
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(e) = self.shutdown() {
                tracing::warn!("Report writer did not shut down cleanly: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for BackgroundReportWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundReportWriter")
            .field("running", &self.handle.is_some())
            .finish()
    }
}
