use std::collections::{HashSet, VecDeque};

/// Visited set and worklist for a single crawl
///
/// A URL is marked visited when it is discovered, not when it is fetched, so
/// two pages linking to the same URL can never enqueue it twice. The visited
/// set only grows.
#[derive(Debug, Default)]
pub struct Frontier {
    /// Every URL ever enqueued or fetched
    visited: HashSet<String>,

    /// URLs waiting to be fetched
    worklist: VecDeque<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as visited without queueing it
    ///
    /// Returns true if the URL was not visited before.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    /// Queues a newly discovered URL unless it was already visited
    ///
    /// Returns true if the URL was queued.
    pub fn enqueue_if_unvisited(&mut self, url: String) -> bool {
        if self.visited.contains(&url) {
            return false;
        }
        self.visited.insert(url.clone());
        self.worklist.push_back(url);
        true
    }

    /// Takes the next URL to fetch
    pub fn next_url(&mut self) -> Option<String> {
        self.worklist.pop_front()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_count(&self) -> usize {
        self.worklist.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.worklist.is_empty()
    }
}
