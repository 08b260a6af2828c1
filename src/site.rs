//! The site adapter extension contract.
//!
//! A [`SiteAdapter`] teaches the pipeline how to read one site: how a
//! listing page maps to item URLs, and how an item URL maps to concrete
//! download metadata. The orchestrator owns everything else — scheduling,
//! failure tracking, byte transfer — so a new site backend is exactly these
//! two methods plus a name.
//!
//! # Examples
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use magpie::{file_name_from_url, DownloadItem, Error, Result, SiteAdapter};
//! use reqwest::Url;
//! use reqwest_middleware::ClientWithMiddleware;
//!
//! struct PlainIndex;
//!
//! #[async_trait]
//! impl SiteAdapter for PlainIndex {
//!     fn kind(&self) -> &'static str {
//!         "plain-index"
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
//! ```

use crate::download::DownloadItem;
use crate::error::Result;

use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;

/// Site-specific parsing and resolution logic.
///
/// Adapters are shared across worker tasks: [`resolve_download_info`] runs
/// concurrently from the download phase, so implementations must not keep
/// unsynchronized mutable state across calls.
///
/// Both methods receive the run's shared HTTP client, which already carries
/// the configured cookie, user agent, proxy, and timeout.
///
/// [`resolve_download_info`]: SiteAdapter::resolve_download_info
#[async_trait]
pub trait SiteAdapter: Send + Sync + 'static {
    /// Short identity of this adapter, recorded in the run configuration.
    fn kind(&self) -> &'static str;

    /// Extract the item URLs from one listing page, in page order.
    ///
    /// Fails with [`Error::Parse`] on malformed markup, network failure, or
    /// missing expected structure; the orchestrator skips the listing and
    /// continues with the remaining ones.
    ///
    /// [`Error::Parse`]: crate::Error::Parse
    async fn parse_listing(
        &self,
        client: &ClientWithMiddleware,
        listing: &Url,
    ) -> Result<Vec<Url>>;

    /// Resolve one item URL into the metadata needed to download it.
    ///
    /// Fails with [`Error::Resolve`] under the same conditions as
    /// [`parse_listing`]; a failed resolution is recorded in the failure set
    /// and the item is never attempted for download.
    ///
    /// [`parse_listing`]: SiteAdapter::parse_listing
    /// [`Error::Resolve`]: crate::Error::Resolve
    async fn resolve_download_info(
        &self,
        client: &ClientWithMiddleware,
        item: &Url,
    ) -> Result<DownloadItem>;
}
