//! Error handling for the magpie library.
//!
//! This module provides centralized error handling for every stage of a
//! crawl. Configuration problems are the only fatal class; listing, item
//! resolution, and download failures are recoverable and handled per listing
//! or per item by the orchestrator.

use std::io;
use thiserror::Error;

/// Errors that can happen when using magpie.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete run configuration.
    ///
    /// This is the only error class that aborts a run, and it is raised
    /// before any network activity takes place.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A listing page could not be parsed.
    ///
    /// Raised by site adapters on malformed markup, network failure, or a
    /// page missing the expected structure. The orchestrator skips the
    /// listing and continues with the remaining ones.
    #[error("Listing parse failed: {0}")]
    Parse(String),

    /// Download metadata for an item could not be resolved.
    ///
    /// Raised by site adapters under the same conditions as [`Error::Parse`].
    /// The item is recorded in the failure set and never attempted for
    /// download.
    #[error("Download info resolution failed: {0}")]
    Resolve(String),

    /// I/O Error.
    ///
    /// This variant wraps standard I/O errors that can occur while creating
    /// directories or writing files during a download.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the HTTP middleware stack.
    #[error("HTTP middleware error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

/// Result type alias for operations that can fail with a magpie error.
pub type Result<T> = std::result::Result<T, Error>;
