#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Path as RoutePath;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use magpie::{CrawlHook, DownloadItem, Error, FailureSet, Result, RunConfig, SiteAdapter};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use sha2::{Digest, Sha256};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Route pipeline tracing into test output, honoring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Fixed prefix of every fixture payload; the item name is appended.
pub const MEDIA_BODY: &[u8] = b"magpie fixture payload ";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// The payload the fixture server hands out for an item name.
pub fn expected_media(name: &str) -> Vec<u8> {
    let mut body = MEDIA_BODY.to_vec();
    body.extend_from_slice(name.as_bytes());
    body
}

/// SHA-256 of a file on disk.
pub fn sha256_file(path: &Path) -> Vec<u8> {
    let bytes = fs::read(path).expect("Failed to read file");
    Sha256::digest(&bytes).to_vec()
}

/// In-process HTTP server handing out fixture media payloads.
pub struct FixtureServer {
    pub addr: SocketAddr,
}

impl FixtureServer {
    pub async fn spawn() -> Self {
        init_tracing();
        let app = Router::new()
            .route("/media/:name", get(serve_media))
            .route("/missing/:name", get(serve_missing));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fixture server");
        let addr = listener.local_addr().expect("Failed to read bound address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fixture server died");
        });
        Self { addr }
    }

    pub fn media_url(&self, name: &str) -> Url {
        Url::parse(&format!("http://{}/media/{}", self.addr, name)).unwrap()
    }

    pub fn missing_url(&self, name: &str) -> Url {
        Url::parse(&format!("http://{}/missing/{}", self.addr, name)).unwrap()
    }
}

async fn serve_media(RoutePath(name): RoutePath<String>) -> Vec<u8> {
    expected_media(&name)
}

async fn serve_missing(RoutePath(_name): RoutePath<String>) -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Test adapter mapping fabricated listing URLs onto fixture-server media.
///
/// The behavior is encoded in the URLs themselves: a listing URL carries the
/// item names it yields in its `names` query parameter, a listing whose path
/// contains `broken` fails to parse, and an item whose name starts with
/// `bad` fails to resolve.
pub struct StubAdapter {
    pub media_base: Url,
    pub target_dir: PathBuf,
    pub resolve_calls: Arc<AtomicUsize>,
}

impl StubAdapter {
    pub fn new(server: &FixtureServer, target_dir: impl Into<PathBuf>) -> Self {
        let media_base = Url::parse(&format!("http://{}/media/", server.addr)).unwrap();
        Self::with_base(media_base, target_dir)
    }

    pub fn with_base(media_base: Url, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_base,
            target_dir: target_dir.into(),
            resolve_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Listing URL whose query names the items it yields.
    pub fn listing_url(&self, names: &[&str]) -> Url {
        let mut url = self.media_base.join("/list").unwrap();
        url.set_query(Some(&format!("names={}", names.join(","))));
        url
    }

    /// Listing URL the adapter refuses to parse.
    pub fn broken_listing_url(&self) -> Url {
        self.media_base.join("/list-broken").unwrap()
    }
}

#[async_trait]
impl SiteAdapter for StubAdapter {
    fn kind(&self) -> &'static str {
        "stub"
    }

    async fn parse_listing(
        &self,
        _client: &ClientWithMiddleware,
        listing: &Url,
    ) -> Result<Vec<Url>> {
        if listing.path().contains("broken") {
            return Err(Error::Parse(format!("unreadable listing {listing}")));
        }
        let names = listing
            .query_pairs()
            .find(|(key, _)| key == "names")
            .map(|(_, val)| val.into_owned())
            .unwrap_or_default();
        Ok(names
            .split(',')
            .filter(|name| !name.is_empty())
            .map(|name| self.media_base.join(name).unwrap())
            .collect())
    }

    async fn resolve_download_info(
        &self,
        _client: &ClientWithMiddleware,
        item: &Url,
    ) -> Result<DownloadItem> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let name = item
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();
        if name.starts_with("bad") {
            return Err(Error::Resolve(format!("no media behind {item}")));
        }
        Ok(DownloadItem::new(
            &format!("{name}.bin"),
            self.target_dir.clone(),
            item,
        ))
    }
}

/// Adapter wired to nowhere, for tests that never touch the network.
pub fn test_adapter() -> StubAdapter {
    StubAdapter::with_base(Url::parse("http://127.0.0.1:1/media/").unwrap(), ".")
}

/// Hook recording event tags in arrival order.
pub struct RecorderHook {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecorderHook {
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: events.clone(),
            },
            events,
        )
    }

    fn push(&self, tag: String) {
        self.events.lock().unwrap().push(tag);
    }
}

impl CrawlHook for RecorderHook {
    fn listing_phase_started(&self, _config: &RunConfig) {
        self.push("listing_phase_started".into());
    }

    fn listing_started(&self, _config: &RunConfig, listing: &Url) {
        self.push(format!("listing_started {listing}"));
    }

    fn listing_parsed(&self, _config: &RunConfig, _listing: &Url, items: &[Url]) {
        self.push(format!("listing_parsed {}", items.len()));
    }

    fn listing_failed(&self, _config: &RunConfig, listing: &Url, _error: &Error) {
        self.push(format!("listing_failed {listing}"));
    }

    fn listing_phase_done(&self, _config: &RunConfig, items: &[Url]) {
        self.push(format!("listing_phase_done {}", items.len()));
    }

    fn resolve_started(&self, _config: &RunConfig, _failed: &FailureSet, item: &Url) {
        self.push(format!("resolve_started {item}"));
    }

    fn fetch_done(
        &self,
        _config: &RunConfig,
        _failed: &FailureSet,
        info: &DownloadItem,
        success: bool,
    ) {
        self.push(format!("fetch_done {} {success}", info.file_name));
    }

    fn run_done(&self, _config: &RunConfig, failed: &FailureSet, items: &[Url]) {
        self.push(format!("run_done {} {}", items.len(), failed.len()));
    }
}
