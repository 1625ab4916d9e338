use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    pub metadata: HashMap<String, String>,
    pub raw_html: String,
}

/// A URL queued for fetching, tagged with the depth it was discovered at (seed = 1).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrawlUrl {
    pub url: String,
    pub depth: usize,
}

impl CrawlUrl {
    pub fn new(url: impl Into<String>, depth: usize) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    pub fn seed(url: impl Into<String>) -> Self {
        Self::new(url, 1)
    }
}

/// Counters for a single run. Created fresh by every crawl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub links_discovered: usize,
    pub waves: usize,
    pub deepest_depth: usize,
    pub elapsed: Duration,
}

/// Everything a run produced: the page map plus bookkeeping the page map can't express.
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    pub pages: HashMap<String, Page>,
    /// URL -> reason, for admitted URLs that produced no page
    pub failures: HashMap<String, String>,
    pub stats: CrawlStats,
}

impl CrawlResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_page(&mut self, page: Page, depth: usize) {
        self.stats.pages_fetched += 1;
        self.stats.deepest_depth = self.stats.deepest_depth.max(depth);
        self.pages.insert(page.url.clone(), page);
    }

    pub(crate) fn record_failure(&mut self, url: String, reason: String) {
        self.stats.pages_failed += 1;
        self.failures.insert(url, reason);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    pub fn into_pages(self) -> HashMap<String, Page> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str) -> Page {
        Page {
            url: url.to_string(),
            metadata: HashMap::new(),
            raw_html: "<html></html>".to_string(),
        }
    }

    #[test]
    fn test_record_page_updates_stats() {
        let mut result = CrawlResult::new();
        result.record_page(page("http://a.test/"), 1);
        result.record_page(page("http://a.test/b"), 2);

        assert_eq!(result.len(), 2);
        assert_eq!(result.stats.pages_fetched, 2);
        assert_eq!(result.stats.deepest_depth, 2);
        assert!(result.contains("http://a.test/b"));
    }

    #[test]
    fn test_record_failure_is_not_a_page() {
        let mut result = CrawlResult::new();
        result.record_failure("http://a.test/gone".to_string(), "HTTP status 404".to_string());

        assert!(result.is_empty());
        assert_eq!(result.stats.pages_failed, 1);
        assert_eq!(
            result.failures.get("http://a.test/gone").map(String::as_str),
            Some("HTTP status 404")
        );
    }

    #[test]
    fn test_page_serializes_to_wire_shape() {
        let mut p = page("http://a.test/");
        p.metadata.insert("description".to_string(), "hello".to_string());
        let value = serde_json::to_value(&p).unwrap();

        assert_eq!(value["url"], "http://a.test/");
        assert_eq!(value["metadata"]["description"], "hello");
        assert_eq!(value["raw_html"], "<html></html>");
    }
}
