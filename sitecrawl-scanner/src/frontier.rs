use crate::result::CrawlUrl;
use std::collections::HashSet;
use tokio::sync::Mutex;
use tracing::debug;

/// A resolved link found on a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    pub url: String,
    pub is_internal: bool,
}

/// Traversal bookkeeping for one run: the visited set plus the page and depth ceilings.
///
/// `admit` is the only way into the visited set and holds the lock across the
/// check and the insert, so a URL is admitted at most once and the set never
/// grows past `max_pages`, however many tasks race on it.
#[derive(Debug)]
pub struct Frontier {
    visited: Mutex<HashSet<String>>,
    max_pages: usize,
    max_depth: usize,
}

impl Frontier {
    pub fn new(max_pages: usize, max_depth: usize) -> Self {
        Self {
            visited: Mutex::new(HashSet::new()),
            max_pages,
            max_depth,
        }
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Claim `url` for fetching. True iff it was unseen and the page cap had room.
    pub async fn admit(&self, url: &str) -> bool {
        let mut visited = self.visited.lock().await;
        if visited.len() >= self.max_pages || visited.contains(url) {
            return false;
        }
        visited.insert(url.to_string())
    }

    pub async fn visited_count(&self) -> usize {
        self.visited.lock().await.len()
    }

    /// The page cap has been reached; nothing more will be admitted.
    pub async fn is_saturated(&self) -> bool {
        self.visited_count().await >= self.max_pages
    }

    /// Turn the links found during a wave at `source_depth` into the next wave.
    ///
    /// External links are dropped, and so is everything once the next depth
    /// would pass `max_depth`. Duplicates are left for `admit` to reject.
    pub fn next_wave(&self, discovered: Vec<DiscoveredLink>, source_depth: usize) -> Vec<CrawlUrl> {
        let depth = source_depth + 1;
        if depth > self.max_depth {
            debug!("Depth {} exceeds max depth {}, not expanding", depth, self.max_depth);
            return Vec::new();
        }

        discovered
            .into_iter()
            .filter(|link| link.is_internal)
            .map(|link| CrawlUrl::new(link.url, depth))
            .collect()
    }
}
