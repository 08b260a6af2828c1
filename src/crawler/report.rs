//! Run results: the failure ledger and the final report.

use dashmap::DashSet;
use reqwest::Url;

/// Concurrency-safe set of item URLs that did not complete.
///
/// Worker tasks insert into the set concurrently; hooks may read it at any
/// time and the final [`CrawlReport`] exposes it after the pool drains.
/// Listing-parse failures are never recorded here — only item resolution
/// and download failures are. Iteration order is not part of the contract,
/// only membership is.
#[derive(Debug, Clone, Default)]
pub struct FailureSet {
    inner: DashSet<Url>,
}

impl FailureSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, url: Url) -> bool {
        self.inner.insert(url)
    }

    /// Number of failed items.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// `true` when every item completed.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether the given item URL failed.
    pub fn contains(&self, url: &Url) -> bool {
        self.inner.contains(url)
    }

    /// Copy the current membership out.
    pub fn snapshot(&self) -> Vec<Url> {
        self.inner.iter().map(|entry| entry.key().clone()).collect()
    }
}

/// Final outcome of a crawl.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    target_urls: Vec<Url>,
    failures: FailureSet,
}

impl CrawlReport {
    pub(crate) fn new(target_urls: Vec<Url>, failures: FailureSet) -> Self {
        Self {
            target_urls,
            failures,
        }
    }

    /// All item URLs produced by the listing phase, in listing order.
    pub fn target_urls(&self) -> &[Url] {
        &self.target_urls
    }

    /// The items that failed resolution or download.
    pub fn failures(&self) -> &FailureSet {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_set_membership() {
        let set = FailureSet::new();
        let a = Url::parse("http://site/a").unwrap();
        let b = Url::parse("http://site/b").unwrap();

        assert!(set.is_empty());
        assert!(set.insert(a.clone()));
        assert!(!set.insert(a.clone()));
        assert!(set.insert(b.clone()));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
        assert!(set.contains(&b));

        let mut snapshot = set.snapshot();
        snapshot.sort_by(|x, y| x.as_str().cmp(y.as_str()));
        assert_eq!(snapshot, vec![a, b]);
    }

    #[test]
    fn test_report_exposes_results() {
        let urls = vec![
            Url::parse("http://site/a").unwrap(),
            Url::parse("http://site/b").unwrap(),
        ];
        let failures = FailureSet::new();
        failures.insert(urls[1].clone());

        let report = CrawlReport::new(urls.clone(), failures);
        assert_eq!(report.target_urls(), urls.as_slice());
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures().contains(&urls[1]));
    }
}
