//! Download module containing download-related functionality.
//!
//! This module provides the structures for moving one item's bytes to disk:
//!
//! - [`item`] - Resolved download metadata and file-name sanitation
//! - [`engine`] - The streaming [`Fetcher`] with skip-if-exists policy and
//!   progress reporting

pub mod engine;
pub mod item;

pub use engine::{FetchStatus, Fetcher};
pub use item::{file_name_from_url, sanitize_file_name, DownloadItem};
