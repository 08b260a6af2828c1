//! Streaming download engine.
//!
//! [`Fetcher`] performs one item's byte transfer: it honors the
//! skip-if-exists policy, creates missing parent directories, and streams
//! the response body to the target file chunk by chunk, reporting progress
//! after every chunk.
//!
//! # Examples
//!
//! ```rust,no_run
//! use magpie::{create_http_client, DownloadItem, Fetcher, HttpClientConfig, RunConfig};
//! use reqwest::Url;
//!
//! # #[tokio::main]
//! # async fn main() -> magpie::Result<()> {
//! let config = RunConfig::default();
//! let client = create_http_client(HttpClientConfig::default())?;
//! let fetcher = Fetcher::new(&config);
//!
//! let link = Url::parse("https://example.com/media/clip.mp4").unwrap();
//! let item = DownloadItem::new("clip.mp4", "downloads", &link);
//!
//! let status = fetcher
//!     .fetch(&client, &item, |transferred, total| {
//!         println!("{transferred} of {total:?} bytes");
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RunConfig;
use crate::download::item::DownloadItem;
use crate::error::Result;

use futures::StreamExt;
use reqwest_middleware::ClientWithMiddleware;
use std::path::PathBuf;
use tokio::fs;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

/// Outcome of a successful [`Fetcher::fetch`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The body was transferred and written to the target file.
    Completed,
    /// The target file already existed and overwriting is disabled; nothing
    /// was transferred.
    SkippedExisting,
}

/// Performs single-item byte transfers.
#[derive(Debug, Clone)]
pub struct Fetcher {
    base_dir: PathBuf,
    buffer_size: usize,
    overwrite: bool,
}

impl Fetcher {
    /// Creates a fetcher from the run's transfer settings.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            buffer_size: config.buffer_size,
            overwrite: config.overwrite,
        }
    }

    /// Where an item lands on disk: its target path, resolved against the
    /// run's base directory when the adapter gave a relative one.
    pub fn resolve_target(&self, item: &DownloadItem) -> PathBuf {
        let target = item.target_path();
        if target.is_absolute() {
            target
        } else {
            self.base_dir.join(target)
        }
    }

    /// Fetches one item and writes it to its target path.
    ///
    /// `on_progress` is invoked after every chunk with the bytes written so
    /// far and the expected total; the total is `None` when the server does
    /// not announce a content length (chunked transfer), in which case
    /// progress degrades to a plain byte count.
    ///
    /// On failure the connection and file handle are released by drop on
    /// every exit path. A partially written file is left in place; cleaning
    /// it up is deliberately not attempted.
    pub async fn fetch<F>(
        &self,
        client: &ClientWithMiddleware,
        item: &DownloadItem,
        mut on_progress: F,
    ) -> Result<FetchStatus>
    where
        F: FnMut(u64, Option<u64>),
    {
        let target = self.resolve_target(item);
        if !self.overwrite && target.exists() {
            debug!("{:?} already exists, skipping", target);
            return Ok(FetchStatus::SkippedExisting);
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        debug!("Fetching {}", item.link);
        let res = client
            .get(item.link.as_str())
            .send()
            .await?
            .error_for_status()?;
        let total = res.content_length();

        debug!("Creating destination file {:?}", target);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&target)
            .await?;
        let mut writer = BufWriter::with_capacity(self.buffer_size, file);

        let mut transferred: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let mut chunk = chunk?;
            transferred += chunk.len() as u64;
            writer.write_all_buf(&mut chunk).await?;
            on_progress(transferred, total);
        }
        writer.flush().await?;

        Ok(FetchStatus::Completed)
    }
}
