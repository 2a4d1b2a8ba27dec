//! The crawl frontier: not-yet-visited candidate URLs
//!
//! An explicit object owned by the orchestrator, never shared state. The
//! queue is breadth-first: links discovered on page N are appended after
//! everything discovered on pages 0..N-1, so shallower pages are
//! generally visited first.

use crate::url::{normalize_url, DiscoveryFilter};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Ordered queue plus seen-set of candidate URLs for one crawl run
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<Url>,
    /// Keys are normalized URL strings; marked at enqueue time so a URL
    /// is queued and fetched at most once per crawl
    seen: HashSet<String>,
    filter: DiscoveryFilter,
    max_pages: usize,
    yielded: usize,
}

impl Frontier {
    /// Creates a frontier seeded with the crawl's starting URL
    ///
    /// The seed bypasses the discovery filter; only discovered links are
    /// subject to it.
    pub fn new(seed: Url, filter: DiscoveryFilter, max_pages: usize) -> Self {
        let mut seen = HashSet::new();
        seen.insert(seed.as_str().to_string());

        let mut queue = VecDeque::new();
        queue.push_back(seed);

        Self {
            queue,
            seen,
            filter,
            max_pages,
            yielded: 0,
        }
    }

    /// Pops the next URL to visit, respecting the page bound
    pub fn next_url(&mut self) -> Option<Url> {
        if self.yielded >= self.max_pages {
            return None;
        }
        let url = self.queue.pop_front()?;
        self.yielded += 1;
        Some(url)
    }

    /// Feeds candidate links from a just-fetched page into the frontier
    ///
    /// Each candidate is normalized, run through the discovery filter,
    /// and deduplicated against everything seen so far. Once the
    /// seen-set reaches the page bound, discovery stops contributing new
    /// work; already-queued work still drains.
    ///
    /// Returns the number of URLs actually enqueued.
    pub fn discover(&mut self, candidates: &[Url]) -> usize {
        let mut added = 0;

        for candidate in candidates {
            if self.seen.len() >= self.max_pages {
                tracing::debug!(
                    "Page bound of {} reached, discovery stopped",
                    self.max_pages
                );
                break;
            }

            let normalized = match normalize_url(candidate.as_str()) {
                Ok(url) => url,
                Err(_) => continue,
            };

            if !self.filter.accept(&normalized) {
                continue;
            }

            if self.seen.insert(normalized.as_str().to_string()) {
                self.queue.push_back(normalized);
                added += 1;
            }
        }

        added
    }

    /// Number of URLs handed out so far
    pub fn visited(&self) -> usize {
        self.yielded
    }

    /// Number of URLs waiting in the queue
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Estimate of the total page count: visited plus queued
    ///
    /// Grows as new links are discovered, never past the page bound.
    pub fn total_known(&self) -> usize {
        self.yielded + self.queue.len()
    }

    /// Returns true if another call to [`Frontier::next_url`] can yield
    pub fn has_work(&self) -> bool {
        self.yielded < self.max_pages && !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiscoveryConfig;

    fn frontier_for(seed: &str, max_pages: usize) -> Frontier {
        let seed = normalize_url(seed).unwrap();
        let filter = DiscoveryFilter::new(&seed, DiscoveryConfig::default()).unwrap();
        Frontier::new(seed, filter, max_pages)
    }

    fn urls(raw: &[&str]) -> Vec<Url> {
        raw.iter().map(|s| Url::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_seed_is_first() {
        let mut frontier = frontier_for("https://example.com/docs/button", 50);
        let first = frontier.next_url().unwrap();
        assert_eq!(first.as_str(), "https://example.com/docs/button");
        assert!(frontier.next_url().is_none());
    }

    #[test]
    fn test_path_filter_scenario() {
        // Seed page links to a docs page (kept) and a marketing page
        // (excluded by the path filter)
        let mut frontier = frontier_for("https://example.com/docs/button", 50);
        frontier.next_url().unwrap();

        let added = frontier.discover(&urls(&[
            "https://example.com/docs/input",
            "https://example.com/about",
        ]));

        assert_eq!(added, 1);
        let next = frontier.next_url().unwrap();
        assert_eq!(next.as_str(), "https://example.com/docs/input");
        assert!(frontier.next_url().is_none());
    }

    #[test]
    fn test_breadth_first_order() {
        let mut frontier = frontier_for("https://example.com/docs", 50);
        frontier.next_url().unwrap();

        // Links from page 0
        frontier.discover(&urls(&[
            "https://example.com/docs/a",
            "https://example.com/docs/b",
        ]));

        let a = frontier.next_url().unwrap();
        assert_eq!(a.path(), "/docs/a");

        // Links from page 1 are appended after page 0's remaining links
        frontier.discover(&urls(&["https://example.com/docs/a/deep"]));

        assert_eq!(frontier.next_url().unwrap().path(), "/docs/b");
        assert_eq!(frontier.next_url().unwrap().path(), "/docs/a/deep");
    }

    #[test]
    fn test_dedup_across_pages() {
        let mut frontier = frontier_for("https://example.com/docs", 50);
        frontier.next_url().unwrap();

        assert_eq!(frontier.discover(&urls(&["https://example.com/docs/a"])), 1);
        assert_eq!(frontier.discover(&urls(&["https://example.com/docs/a"])), 0);
        // The seed itself is also deduplicated
        assert_eq!(frontier.discover(&urls(&["https://example.com/docs"])), 0);
    }

    #[test]
    fn test_dedup_is_normalization_aware() {
        let mut frontier = frontier_for("https://example.com/docs", 50);
        frontier.next_url().unwrap();

        frontier.discover(&urls(&["https://example.com/docs/a"]));
        // Same page, different spellings
        let added = frontier.discover(&urls(&[
            "https://example.com/docs/a/",
            "https://example.com/docs/a#props",
        ]));
        assert_eq!(added, 0);
    }

    #[test]
    fn test_page_bound_stops_discovery() {
        let mut frontier = frontier_for("https://example.com/docs", 3);
        frontier.next_url().unwrap();

        let added = frontier.discover(&urls(&[
            "https://example.com/docs/a",
            "https://example.com/docs/b",
            "https://example.com/docs/c",
            "https://example.com/docs/d",
        ]));

        // Seed + two discovered = bound of three
        assert_eq!(added, 2);
        assert_eq!(frontier.total_known(), 3);

        assert!(frontier.next_url().is_some());
        assert!(frontier.next_url().is_some());
        assert!(frontier.next_url().is_none());
        assert_eq!(frontier.visited(), 3);
    }

    #[test]
    fn test_yield_bound() {
        let mut frontier = frontier_for("https://example.com/docs", 1);
        assert!(frontier.next_url().is_some());
        assert!(frontier.next_url().is_none());
        assert!(!frontier.has_work());
    }

    #[test]
    fn test_total_known_grows_with_discovery() {
        let mut frontier = frontier_for("https://example.com/docs", 50);
        assert_eq!(frontier.total_known(), 1);

        frontier.next_url().unwrap();
        frontier.discover(&urls(&[
            "https://example.com/docs/a",
            "https://example.com/docs/b",
        ]));
        assert_eq!(frontier.total_known(), 3);
    }

    #[test]
    fn test_cross_origin_rejected() {
        let mut frontier = frontier_for("https://example.com/docs", 50);
        frontier.next_url().unwrap();
        assert_eq!(frontier.discover(&urls(&["https://other.com/docs/a"])), 0);
    }
}
