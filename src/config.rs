//! Run configuration.
//!
//! [`RunConfig`] holds the parameters of a single crawl: request identity
//! (user agent, cookie, proxy), transfer tuning (timeout, buffer size),
//! filesystem layout (base directory, overwrite policy), worker-pool sizing,
//! and the listing pages to crawl. A config is normalized and checked once
//! through [`RunConfig::validated`] and treated as read-only afterwards.
//!
//! # Examples
//!
//! ```rust
//! use magpie::RunConfig;
//! use reqwest::Url;
//!
//! # fn main() -> magpie::Result<()> {
//! let config = RunConfig {
//!     user_agent: "magpie/0.1".into(),
//!     adapter_kind: "mirror".into(),
//!     listings: vec![Url::parse("https://example.com/list").unwrap()],
//!     ..RunConfig::default()
//! }
//! .validated()?;
//!
//! assert!(config.max_workers > 0);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};

use reqwest::{Proxy, Url};
use std::path::PathBuf;
use std::time::Duration;

/// Default request timeout, applied to connects and reads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Default size of the download write buffer (5 MiB).
pub const DEFAULT_BUFFER_SIZE: usize = 5 * 1024 * 1024;

/// Parameters of a single crawl.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// User-Agent header attached to every request. Empty sends none.
    pub user_agent: String,
    /// Cookie header attached to every request. Empty sends none.
    pub cookie: String,
    /// Proxy as `"host:port"`. Malformed values are ignored, not fatal.
    pub proxy: Option<String>,
    /// Connect and read timeout.
    pub timeout: Duration,
    /// Size of the write buffer used while streaming a download to disk.
    pub buffer_size: usize,
    /// Directory under which adapters place their target directories.
    pub base_dir: PathBuf,
    /// Replace files that already exist at a download's target path.
    pub overwrite: bool,
    /// Baseline worker count. `0` derives `cpus + 1`.
    pub core_workers: usize,
    /// Bound on concurrently running download tasks. `0` derives `cpus * 2`.
    pub max_workers: usize,
    /// Identity of the site adapter driving this run.
    pub adapter_kind: String,
    /// Listing pages to crawl, in order. Must not be empty.
    pub listings: Vec<Url>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            cookie: String::new(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            base_dir: PathBuf::from("."),
            overwrite: false,
            core_workers: 0,
            max_workers: 0,
            adapter_kind: String::new(),
            listings: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Normalize defaults and reject configurations the pipeline cannot run
    /// with.
    ///
    /// Worker counts, timeout, buffer size, and base directory fall back to
    /// safe values when unset; an empty adapter kind or an empty listing
    /// list is a fatal [`Error::Config`].
    pub fn validated(mut self) -> Result<Self> {
        let cpus = num_cpus::get();
        if self.core_workers == 0 {
            self.core_workers = cpus + 1;
        }
        if self.max_workers == 0 {
            self.max_workers = cpus * 2;
        }
        if self.max_workers < self.core_workers {
            self.max_workers = self.core_workers;
        }
        if self.timeout.is_zero() {
            self.timeout = DEFAULT_TIMEOUT;
        }
        if self.buffer_size == 0 {
            self.buffer_size = DEFAULT_BUFFER_SIZE;
        }
        if self.base_dir.as_os_str().is_empty() {
            self.base_dir = PathBuf::from(".");
        }
        if self.adapter_kind.trim().is_empty() {
            return Err(Error::Config("the adapter kind must not be empty".into()));
        }
        if self.listings.is_empty() {
            return Err(Error::Config(
                "at least one listing URL is required".into(),
            ));
        }
        Ok(self)
    }

    /// Build the proxy from the configured `"host:port"` string.
    ///
    /// Returns `None` when no proxy is configured or when the string is
    /// malformed (missing colon, empty host, non-numeric port).
    pub fn proxy(&self) -> Option<Proxy> {
        let raw = self.proxy.as_deref()?.trim();
        let (host, port) = raw.split_once(':')?;
        if host.is_empty() || port.parse::<u16>().is_err() {
            return None;
        }
        Proxy::all(format!("http://{host}:{port}")).ok()
    }
}
