//! Console implementation of the crawl hook.
//!
//! [`ConsoleHook`] narrates the run through `tracing` events and renders an
//! overall progress bar plus one transfer bar per in-flight download. It is
//! one possible observer, not part of the hook contract; callers wanting
//! different output implement [`CrawlHook`](super::CrawlHook) themselves.

use super::CrawlHook;
use crate::config::RunConfig;
use crate::crawler::FailureSet;
use crate::download::DownloadItem;
use crate::error::Error;

use dashmap::DashMap;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::Url;
use std::sync::Mutex;
use tracing::{debug, info, warn};

const OVERALL_TEMPLATE: &str = "{bar:40.cyan/blue} {pos}/{len} items";
const TRANSFER_TEMPLATE: &str = "{bar:40.green/black} {bytes}/{total_bytes} {wide_msg}";

/// Progress-bar and log based observer.
pub struct ConsoleHook {
    multi: MultiProgress,
    /// Overall bar, created once the item count is known.
    overall: Mutex<Option<ProgressBar>>,
    /// One transfer bar per in-flight download, keyed by media link.
    transfers: DashMap<Url, ProgressBar>,
}

impl ConsoleHook {
    /// Creates a console hook drawing to stderr.
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            overall: Mutex::new(None),
            transfers: DashMap::new(),
        }
    }

    /// Convenience constructor for a hook that logs but draws no bars.
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            overall: Mutex::new(None),
            transfers: DashMap::new(),
        }
    }

    fn style(template: &str) -> ProgressStyle {
        ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn bump_overall(&self) {
        if let Ok(guard) = self.overall.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.inc(1);
            }
        }
    }
}

impl Default for ConsoleHook {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlHook for ConsoleHook {
    fn listing_phase_started(&self, _config: &RunConfig) {
        info!("parsing listing pages");
    }

    fn listing_started(&self, _config: &RunConfig, listing: &Url) {
        info!(%listing, "parsing listing");
    }

    fn listing_parsed(&self, _config: &RunConfig, listing: &Url, items: &[Url]) {
        info!(%listing, count = items.len(), "listing parsed");
    }

    fn listing_failed(&self, _config: &RunConfig, listing: &Url, error: &Error) {
        warn!(%listing, %error, "listing parse failed, skipping");
    }

    fn listing_phase_done(&self, _config: &RunConfig, items: &[Url]) {
        info!(total = items.len(), "listing phase complete");
        let pb = self.multi.add(
            ProgressBar::new(items.len() as u64).with_style(Self::style(OVERALL_TEMPLATE)),
        );
        pb.tick();
        if let Ok(mut guard) = self.overall.lock() {
            *guard = Some(pb);
        }
    }

    fn resolve_started(&self, _config: &RunConfig, _failed: &FailureSet, item: &Url) {
        debug!(%item, "resolving download info");
    }

    fn resolve_done(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        item: &Url,
        info: Option<&DownloadItem>,
    ) {
        match info {
            Some(info) => debug!(%item, file = %info.file_name, "download info resolved"),
            None => debug!(%item, "no download info"),
        }
    }

    fn resolve_failed(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        item: &Url,
        error: &Error,
    ) {
        warn!(%item, %error, "resolution failed");
        self.bump_overall();
    }

    fn fetch_started(&self, _config: &RunConfig, _failed: &FailureSet, info: &DownloadItem) {
        info!(file = %info.file_name, link = %info.link, "downloading");
        let pb = self.multi.add(
            ProgressBar::new(0)
                .with_style(Self::style(TRANSFER_TEMPLATE))
                .with_message(info.file_name.clone()),
        );
        self.transfers.insert(info.link.clone(), pb);
    }

    fn fetch_progress(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        info: &DownloadItem,
        transferred: u64,
        total: Option<u64>,
    ) {
        if let Some(pb) = self.transfers.get(&info.link) {
            if let Some(total) = total {
                pb.set_length(total);
            }
            pb.set_position(transferred);
        }
    }

    fn fetch_failed(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        info: &DownloadItem,
        error: &Error,
    ) {
        warn!(file = %info.file_name, %error, "download failed");
    }

    fn fetch_done(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        info: &DownloadItem,
        success: bool,
    ) {
        if let Some((_, pb)) = self.transfers.remove(&info.link) {
            pb.finish_and_clear();
        }
        self.bump_overall();
        if success {
            info!(file = %info.file_name, "download finished");
        }
    }

    fn run_done(&self, _config: &RunConfig, failed: &FailureSet, items: &[Url]) {
        if let Ok(mut guard) = self.overall.lock() {
            if let Some(pb) = guard.take() {
                pb.finish();
            }
        }
        info!(total = items.len(), failed = failed.len(), "all tasks done");
        for url in failed.snapshot() {
            warn!(%url, "failed");
        }
    }
}
