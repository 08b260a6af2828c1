//! Builder pattern implementation for creating Crawler instances.
//!
//! [`CrawlerBuilder`] assembles a [`Crawler`] from a site adapter, an
//! optional hook, and run parameters. Building validates the configuration
//! and constructs the shared HTTP client — the only stage that can fail,
//! and the last point before any network activity.
//!
//! # Examples
//!
//! ```rust,no_run
//! # use async_trait::async_trait;
//! # use magpie::{DownloadItem, Result, SiteAdapter};
//! # use reqwest::Url;
//! # use reqwest_middleware::ClientWithMiddleware;
//! # struct MySite;
//! # #[async_trait]
//! # impl SiteAdapter for MySite {
//! #     fn kind(&self) -> &'static str { "my-site" }
//! #     async fn parse_listing(&self, _c: &ClientWithMiddleware, _l: &Url) -> Result<Vec<Url>> { Ok(vec![]) }
//! #     async fn resolve_download_info(&self, _c: &ClientWithMiddleware, i: &Url) -> Result<DownloadItem> {
//! #         Ok(DownloadItem::new("f", ".", i))
//! #     }
//! # }
//! use magpie::{ConsoleHook, CrawlerBuilder};
//! use std::path::PathBuf;
//!
//! # fn main() -> magpie::Result<()> {
//! let crawler = CrawlerBuilder::new(MySite)
//!     .user_agent("magpie/0.1")
//!     .cookie("session=abc")
//!     .base_dir(PathBuf::from("downloads"))
//!     .workers(4, 8)
//!     .listing(Url::parse("https://example.com/list?page=1").unwrap())
//!     .hook(ConsoleHook::new())
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::crawler::Crawler;
use crate::config::RunConfig;
use crate::error::Result;
use crate::hook::{CrawlHook, NoopHook};
use crate::http::{create_http_client, HttpClientConfig};
use crate::site::SiteAdapter;

use reqwest::Url;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create a [`Crawler`].
pub struct CrawlerBuilder {
    config: RunConfig,
    adapter: Arc<dyn SiteAdapter>,
    hook: Arc<dyn CrawlHook>,
}

impl CrawlerBuilder {
    /// Creates a builder around a site adapter, with default options and no
    /// observer. The adapter's [`kind`](SiteAdapter::kind) becomes the
    /// configuration's adapter identity.
    pub fn new(adapter: impl SiteAdapter) -> Self {
        let adapter: Arc<dyn SiteAdapter> = Arc::new(adapter);
        let config = RunConfig {
            adapter_kind: adapter.kind().to_string(),
            ..RunConfig::default()
        };
        Self {
            config,
            adapter,
            hook: Arc::new(NoopHook),
        }
    }

    /// Replaces the whole run configuration. An empty adapter kind is
    /// filled back in from the adapter.
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        if self.config.adapter_kind.is_empty() {
            self.config.adapter_kind = self.adapter.kind().to_string();
        }
        self
    }

    /// Sets the User-Agent header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Sets the Cookie header sent with every request.
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.config.cookie = cookie.into();
        self
    }

    /// Sets the proxy as `"host:port"`. Malformed values are ignored at run
    /// time rather than rejected.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Sets the connect/read timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the download write-buffer size in bytes.
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.config.buffer_size = buffer_size;
        self
    }

    /// Sets the directory adapters place their target directories under.
    pub fn base_dir(mut self, base_dir: PathBuf) -> Self {
        self.config.base_dir = base_dir;
        self
    }

    /// Sets whether existing files are replaced instead of skipped.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Sets the worker-pool sizing. Zero values are derived from the host
    /// CPU count during validation.
    pub fn workers(mut self, core: usize, max: usize) -> Self {
        self.config.core_workers = core;
        self.config.max_workers = max;
        self
    }

    /// Adds one listing page URL.
    pub fn listing(mut self, url: Url) -> Self {
        self.config.listings.push(url);
        self
    }

    /// Adds several listing page URLs, preserving order.
    pub fn listings<I>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = Url>,
    {
        self.config.listings.extend(urls);
        self
    }

    /// Installs a lifecycle observer. Without one, the run is silent.
    pub fn hook(mut self, hook: impl CrawlHook + 'static) -> Self {
        self.hook = Arc::new(hook);
        self
    }

    /// Validates the configuration and creates the [`Crawler`].
    pub fn build(self) -> Result<Crawler> {
        let config = self.config.validated()?;
        let client = create_http_client(HttpClientConfig::from_run_config(&config)?)?;
        Ok(Crawler::new(
            Arc::new(config),
            self.adapter,
            self.hook,
            client,
        ))
    }
}
