//! Lifecycle observation hooks.
//!
//! A [`CrawlHook`] receives one synchronous callback per pipeline
//! transition: listing start/progress/failure/done, per-item resolve
//! start/done, per-item download start/progress/done, and run completion.
//! Hooks are strictly observational — they never influence control flow or
//! return values — and every method defaults to a no-op, so an observer
//! implements only the events it cares about.
//!
//! Callbacks run on whichever worker produced the event. Hooks receive
//! read-only views of the run configuration and the live failure set, which
//! is safe to iterate at any time.
//!
//! [`ConsoleHook`] is the bundled console implementation; [`NoopHook`] is
//! the silent default used when no hook is installed.

use crate::config::RunConfig;
use crate::crawler::FailureSet;
use crate::download::DownloadItem;
use crate::error::Error;

use reqwest::Url;

pub mod console;

pub use console::ConsoleHook;

/// Observer of pipeline lifecycle events.
pub trait CrawlHook: Send + Sync {
    /// Called once, before any listing page is parsed.
    fn listing_phase_started(&self, _config: &RunConfig) {}

    /// Called before one listing page is parsed.
    fn listing_started(&self, _config: &RunConfig, _listing: &Url) {}

    /// Called after one listing page parsed successfully.
    fn listing_parsed(&self, _config: &RunConfig, _listing: &Url, _items: &[Url]) {}

    /// Called when parsing one listing page failed. The listing is skipped;
    /// the run continues and the failure set is not touched.
    fn listing_failed(&self, _config: &RunConfig, _listing: &Url, _error: &Error) {}

    /// Called once with the full item sequence, in listing order, before any
    /// download task is submitted.
    fn listing_phase_done(&self, _config: &RunConfig, _items: &[Url]) {}

    /// Called before an item URL is resolved into download metadata.
    fn resolve_started(&self, _config: &RunConfig, _failed: &FailureSet, _item: &Url) {}

    /// Called after a resolution attempt, successful or not; `info` is
    /// `None` when resolution failed.
    fn resolve_done(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        _item: &Url,
        _info: Option<&DownloadItem>,
    ) {
    }

    /// Called when an item's resolution failed. The item is recorded in the
    /// failure set and never attempted for download.
    fn resolve_failed(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        _item: &Url,
        _error: &Error,
    ) {
    }

    /// Called before an item's byte transfer starts.
    fn fetch_started(&self, _config: &RunConfig, _failed: &FailureSet, _info: &DownloadItem) {}

    /// Called after every transferred chunk. `total` is `None` when the
    /// server does not announce a content length.
    fn fetch_progress(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        _info: &DownloadItem,
        _transferred: u64,
        _total: Option<u64>,
    ) {
    }

    /// Called when an item's transfer failed. A partial file may remain.
    fn fetch_failed(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        _info: &DownloadItem,
        _error: &Error,
    ) {
    }

    /// Called after an item's transfer finished, with the outcome.
    fn fetch_done(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        _info: &DownloadItem,
        _success: bool,
    ) {
    }

    /// Called once after the worker pool has drained, with the full item
    /// sequence and the final failure set.
    fn run_done(&self, _config: &RunConfig, _failed: &FailureSet, _items: &[Url]) {}
}

/// A hook that observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl CrawlHook for NoopHook {}
