//! HTTP client setup and middleware configuration.
//!
//! This module creates the shared HTTP client the whole pipeline runs on:
//! site adapters use it for page fetches and the download engine streams
//! media through it. The client carries the run's cookie, user agent,
//! proxy, and timeouts, plus tracing middleware for request/response
//! logging.
//!
//! # Examples
//!
//! ```rust
//! use magpie::{create_http_client, HttpClientConfig};
//!
//! # fn main() -> magpie::Result<()> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```

use crate::config::{RunConfig, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};

use reqwest::header::{HeaderMap, HeaderValue, COOKIE, USER_AGENT};
use reqwest::Proxy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Connect and read timeout.
    pub timeout: Duration,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            headers: None,
        }
    }
}

impl HttpClientConfig {
    /// Derive the client configuration from a validated [`RunConfig`].
    ///
    /// The configured cookie and user agent become default headers; a
    /// cookie or user agent that cannot be encoded as a header value is a
    /// configuration error.
    pub fn from_run_config(config: &RunConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if !config.user_agent.is_empty() {
            let value = HeaderValue::from_str(&config.user_agent).map_err(|_| {
                Error::Config("the user agent is not a valid header value".into())
            })?;
            headers.insert(USER_AGENT, value);
        }
        if !config.cookie.is_empty() {
            let value = HeaderValue::from_str(&config.cookie)
                .map_err(|_| Error::Config("the cookie is not a valid header value".into()))?;
            headers.insert(COOKIE, value);
        }
        Ok(Self {
            timeout: config.timeout,
            proxy: config.proxy(),
            headers: (!headers.is_empty()).then_some(headers),
        })
    }
}

/// Creates the shared HTTP client with middleware configuration.
///
/// The timeout applies to connects and reads rather than whole requests, so
/// long-running media transfers are not cut off mid-stream.
pub fn create_http_client(config: HttpClientConfig) -> Result<ClientWithMiddleware> {
    let mut inner_client_builder = reqwest::Client::builder()
        .connect_timeout(config.timeout)
        .read_timeout(config.timeout);

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    let inner_client = inner_client_builder.build()?;

    // Trace HTTP requests. See the tracing crate to make use of these traces.
    let client = ClientBuilder::new(inner_client)
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.proxy.is_none());
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_create_http_client_default() {
        let client = create_http_client(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_from_run_config_builds_headers() {
        let config = RunConfig {
            user_agent: "magpie-test".into(),
            cookie: "session=abc".into(),
            adapter_kind: "test".into(),
            listings: vec![Url::parse("http://site/list").unwrap()],
            ..RunConfig::default()
        };

        let http = HttpClientConfig::from_run_config(&config).unwrap();
        let headers = http.headers.unwrap();
        assert_eq!(headers.get(USER_AGENT).unwrap(), "magpie-test");
        assert_eq!(headers.get(COOKIE).unwrap(), "session=abc");
    }

    #[test]
    fn test_from_run_config_rejects_bad_header_values() {
        let config = RunConfig {
            cookie: "broken\nvalue".into(),
            ..RunConfig::default()
        };

        assert!(matches!(
            HttpClientConfig::from_run_config(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_run_config_without_identity_has_no_headers() {
        let http = HttpClientConfig::from_run_config(&RunConfig::default()).unwrap();
        assert!(http.headers.is_none());
    }
}
