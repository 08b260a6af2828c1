//! Magpie crawls paginated listing pages and downloads the media items they
//! reference, concurrently, via HTTP(S).
//!
//! A run has two phases. The listing phase walks the configured listing
//! pages in order and asks a [`SiteAdapter`] to turn each one into item
//! URLs. The download phase then pushes every item through
//! resolve-then-fetch on a bounded pool of worker tasks, skipping files
//! that already exist and recording every failed item in a concurrent
//! failure set. A [`CrawlHook`] observes each transition without ever
//! steering the pipeline.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use magpie::{
//!     file_name_from_url, ConsoleHook, CrawlerBuilder, DownloadItem, Error, Result, SiteAdapter,
//! };
//! use reqwest::Url;
//! use reqwest_middleware::ClientWithMiddleware;
//!
//! /// Reads listings that are plain lists of media URLs, one per line.
//! struct Mirror;
//!
//! #[async_trait]
//! impl SiteAdapter for Mirror {
//!     fn kind(&self) -> &'static str {
//!         "mirror"
//!     }
//!
//!     async fn parse_listing(
//!         &self,
//!         client: &ClientWithMiddleware,
//!         listing: &Url,
//!     ) -> Result<Vec<Url>> {
//!         let body = client.get(listing.as_str()).send().await?.text().await?;
//!         body.lines()
//!             .filter(|line| line.starts_with("http"))
//!             .map(|line| Url::parse(line).map_err(|e| Error::Parse(e.to_string())))
//!             .collect()
//!     }
//!
//!     async fn resolve_download_info(
//!         &self,
//!         _client: &ClientWithMiddleware,
//!         item: &Url,
//!     ) -> Result<DownloadItem> {
//!         let name = file_name_from_url(item)
//!             .ok_or_else(|| Error::Resolve(format!("{item} has no file name")))?;
//!         Ok(DownloadItem::new(&name, "downloads", item))
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let crawler = CrawlerBuilder::new(Mirror)
//!     .listing(Url::parse("https://example.com/list?page=1").unwrap())
//!     .hook(ConsoleHook::new())
//!     .build()?;
//!
//! let report = crawler.run().await;
//! println!(
//!     "{} of {} items failed",
//!     report.failures().len(),
//!     report.target_urls().len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`config`] - Validated, immutable run parameters
//! - [`site`] - The [`SiteAdapter`] extension contract for site backends
//! - [`crawler`] - The two-phase [`Crawler`], its builder, and the run report
//! - [`download`] - [`DownloadItem`] metadata and the streaming [`Fetcher`]
//! - [`hook`] - The [`CrawlHook`] observation protocol and the console hook
//! - [`http`] - Shared HTTP client with tracing middleware
//! - [`error`] - Centralized error handling with the [`Error`] enum

pub mod config;
pub mod crawler;
pub mod download;
pub mod error;
pub mod hook;
pub mod http;
pub mod site;

pub use config::{RunConfig, DEFAULT_BUFFER_SIZE, DEFAULT_TIMEOUT};
pub use crawler::{CrawlReport, Crawler, CrawlerBuilder, FailureSet};
pub use download::{file_name_from_url, sanitize_file_name, DownloadItem, FetchStatus, Fetcher};
pub use error::{Error, Result};
pub use hook::{ConsoleHook, CrawlHook, NoopHook};
pub use http::{create_http_client, HttpClientConfig};
pub use site::SiteAdapter;

pub use async_trait::async_trait;
