//! HTTP module containing HTTP client functionality.
//!
//! This module provides the shared client the pipeline performs all its
//! network traffic on: creation with tracing middleware, timeout handling,
//! and translation of run configuration into client settings.

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
