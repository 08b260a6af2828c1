//! Core crawler implementation with the two-phase pipeline.
//!
//! This module contains the main [`Crawler`] struct. A crawler executes
//! exactly one run: a sequential listing phase that turns the configured
//! listing pages into an ordered item-URL sequence, then a download phase
//! that pushes every item through resolve-then-fetch on a bounded pool of
//! worker tasks. Hooks observe every transition; failures accumulate in the
//! shared [`FailureSet`] without ever aborting sibling work.
//!
//! See the crate documentation for a complete example.

use super::report::{CrawlReport, FailureSet};
use crate::config::RunConfig;
use crate::download::Fetcher;
use crate::hook::CrawlHook;
use crate::site::SiteAdapter;

use futures::stream::{self, StreamExt};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, warn};

/// Represents the crawl controller.
///
/// A crawler is created via its builder and consumed by [`Crawler::run`]:
/// one instance, one run, no way back to an earlier phase.
pub struct Crawler {
    config: Arc<RunConfig>,
    adapter: Arc<dyn SiteAdapter>,
    hook: Arc<dyn CrawlHook>,
    client: ClientWithMiddleware,
    fetcher: Fetcher,
}

impl Debug for Crawler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crawler")
            .field("config", &self.config)
            .field("adapter", &self.config.adapter_kind)
            .finish()
    }
}

impl Crawler {
    /// Creates a new crawler from validated parts.
    pub(crate) fn new(
        config: Arc<RunConfig>,
        adapter: Arc<dyn SiteAdapter>,
        hook: Arc<dyn CrawlHook>,
        client: ClientWithMiddleware,
    ) -> Self {
        let fetcher = Fetcher::new(&config);
        Self {
            config,
            adapter,
            hook,
            client,
            fetcher,
        }
    }

    /// Gets the validated run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Executes the crawl and returns its report.
    ///
    /// The listing phase walks the configured listing pages in order, on the
    /// calling task; a listing that fails to parse is skipped. The download
    /// phase then submits one task per item URL, in listing order, with at
    /// most `max_workers` running at a time, and waits for all of them
    /// before reporting. The run itself cannot fail: per-item errors end up
    /// in the report's failure set.
    pub async fn run(self) -> CrawlReport {
        let failed = Arc::new(FailureSet::new());

        // Phase one: resolve listings sequentially, preserving input order.
        self.hook.listing_phase_started(&self.config);
        let mut targets: Vec<Url> = Vec::new();
        for listing in &self.config.listings {
            self.hook.listing_started(&self.config, listing);
            match self.adapter.parse_listing(&self.client, listing).await {
                Ok(items) => {
                    self.hook.listing_parsed(&self.config, listing, &items);
                    targets.extend(items);
                }
                Err(e) => {
                    // Listing failures are reported but never recorded in
                    // the failure set and never abort the run.
                    self.hook.listing_failed(&self.config, listing, &e);
                }
            }
        }
        self.hook.listing_phase_done(&self.config, &targets);
        debug!(items = targets.len(), "listing phase complete");

        // Phase two: one spawned task per item, at most max_workers in
        // flight. Spawning isolates tasks: a panicking hook or adapter takes
        // down its own task only.
        let results = stream::iter(targets.iter().cloned())
            .map(|url| {
                let adapter = Arc::clone(&self.adapter);
                let hook = Arc::clone(&self.hook);
                let config = Arc::clone(&self.config);
                let failed = Arc::clone(&failed);
                let client = self.client.clone();
                let fetcher = self.fetcher.clone();
                tokio::spawn(async move {
                    download_one(url, adapter, hook, config, failed, client, fetcher).await
                })
            })
            .buffer_unordered(self.config.max_workers)
            .collect::<Vec<_>>()
            .await;

        for joined in results {
            if let Err(e) = joined {
                warn!(error = %e, "download task aborted");
            }
        }

        self.hook.run_done(&self.config, &failed, &targets);

        let failures = Arc::try_unwrap(failed).unwrap_or_else(|arc| arc.as_ref().clone());
        CrawlReport::new(targets, failures)
    }
}

/// One worker task: resolve an item URL, then fetch it.
async fn download_one(
    url: Url,
    adapter: Arc<dyn SiteAdapter>,
    hook: Arc<dyn CrawlHook>,
    config: Arc<RunConfig>,
    failed: Arc<FailureSet>,
    client: ClientWithMiddleware,
    fetcher: Fetcher,
) {
    hook.resolve_started(&config, &failed, &url);
    let info = match adapter.resolve_download_info(&client, &url).await {
        Ok(info) => {
            hook.resolve_done(&config, &failed, &url, Some(&info));
            info
        }
        Err(e) => {
            hook.resolve_done(&config, &failed, &url, None);
            hook.resolve_failed(&config, &failed, &url, &e);
            failed.insert(url);
            return;
        }
    };

    hook.fetch_started(&config, &failed, &info);
    let outcome = fetcher
        .fetch(&client, &info, |transferred, total| {
            hook.fetch_progress(&config, &failed, &info, transferred, total);
        })
        .await;
    match outcome {
        Ok(_) => {
            hook.fetch_done(&config, &failed, &info, true);
        }
        Err(e) => {
            hook.fetch_failed(&config, &failed, &info, &e);
            hook.fetch_done(&config, &failed, &info, false);
            failed.insert(url);
        }
    }
}
