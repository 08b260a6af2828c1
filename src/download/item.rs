//! Resolved download metadata for a single item.
//!
//! A [`DownloadItem`] is produced by a site adapter for one item URL and
//! consumed exactly once by the download engine. File names derived from
//! remote content pass through [`sanitize_file_name`] so they are always
//! safe to place on disk.

use reqwest::Url;
use std::path::PathBuf;

/// Characters stripped from remote-derived path segments.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', '<', '>', ':', '"', '|'];

/// Strip filesystem-hostile characters from a path segment.
///
/// Adapters should run every segment they derive from remote content
/// (titles, author names, ...) through this before building a
/// [`DownloadItem`].
///
/// ```rust
/// use magpie::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("a/b: \"c\"?.mp4"), "ab c.mp4");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    name.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)).collect()
}

/// Derive a percent-decoded file name from the last path segment of a URL.
///
/// Returns `None` for URLs without a usable path segment.
pub fn file_name_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    if segment.is_empty() {
        return None;
    }
    Some(
        form_urlencoded::parse(segment.as_bytes())
            .map(|(key, val)| [key, val].concat())
            .collect(),
    )
}

/// Everything the download engine needs to fetch one item.
#[derive(Debug, Clone)]
pub struct DownloadItem {
    /// File name used to save the item on disk, already sanitized.
    pub file_name: String,
    /// Directory the file is written into.
    pub target_dir: PathBuf,
    /// Absolute URL of the media payload.
    pub link: Url,
}

impl DownloadItem {
    /// Creates a new [`DownloadItem`], sanitizing the file name.
    pub fn new(file_name: &str, target_dir: impl Into<PathBuf>, link: &Url) -> Self {
        Self {
            file_name: sanitize_file_name(file_name),
            target_dir: target_dir.into(),
            link: link.clone(),
        }
    }

    /// Path the item is written to. A relative path is resolved against the
    /// run's base directory by the download engine.
    pub fn target_path(&self) -> PathBuf {
        self.target_dir.join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_forbidden_characters() {
        assert_eq!(sanitize_file_name(r#"a\b/c*d?e<f>g:h"i|j"#), "abcdefghij");
        assert_eq!(sanitize_file_name("plain-name.mp4"), "plain-name.mp4");
        assert_eq!(sanitize_file_name(""), "");
    }

    #[test]
    fn test_file_name_from_url() {
        let url = Url::parse("https://example.com/media/clip.mp4").unwrap();
        assert_eq!(file_name_from_url(&url), Some("clip.mp4".into()));

        let encoded = Url::parse("https://example.com/media/my%20clip.mp4").unwrap();
        assert_eq!(file_name_from_url(&encoded), Some("my clip.mp4".into()));

        let bare = Url::parse("https://example.com/").unwrap();
        assert_eq!(file_name_from_url(&bare), None);
    }

    #[test]
    fn test_item_sanitizes_and_joins() {
        let link = Url::parse("https://example.com/media/raw").unwrap();
        let item = DownloadItem::new("band: live?.mp4", "out/artist", &link);

        assert_eq!(item.file_name, "band live.mp4");
        assert_eq!(item.target_path(), PathBuf::from("out/artist/band live.mp4"));
    }
}
