//! Crawl statistics
//!
//! Counters collected by the coordinator while a crawl runs, and a helper to
//! log them once it finishes.

use crate::FetchError;
use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    /// Pages fetched successfully (seed included)
    pub pages_fetched: u64,

    /// Pages that ended in a terminal fetch failure
    pub pages_failed: u64,

    /// Failures caused by running out of attempts on timeouts
    pub timeout_failures: u64,

    /// Links added to the worklist
    pub links_enqueued: u64,

    /// Wall-clock start of the crawl
    pub started_at: Option<DateTime<Utc>>,

    /// Wall-clock end of the crawl
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlStats {
    pub fn mark_started(&mut self) {
        self.started_at = Some(Utc::now());
    }

    pub fn mark_finished(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Counts a terminal fetch failure
    pub fn record_failure(&mut self, error: &FetchError) {
        self.pages_failed += 1;
        if error.is_timeout() {
            self.timeout_failures += 1;
        }
    }

    /// Elapsed wall-clock time, once both ends are known
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => Some(finished - started),
            _ => None,
        }
    }
}

/// Logs crawl statistics at info level
///
/// # Arguments
///
/// * `stats` - Counters collected during the crawl
/// * `emails_found` - Number of unique addresses in the result set
pub fn log_statistics(stats: &CrawlStats, emails_found: usize) {
    let elapsed_ms = stats
        .duration()
        .map(|d| d.num_milliseconds())
        .unwrap_or_default();

    tracing::info!(
        "Crawl statistics: {} pages fetched, {} failed ({} timed out), {} links enqueued, {} emails, {}ms",
        stats.pages_fetched,
        stats.pages_failed,
        stats.timeout_failures,
        stats.links_enqueued,
        emails_found,
        elapsed_ms
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_failure_counts_timeouts() {
        let mut stats = CrawlStats::default();
        stats.record_failure(&FetchError::Timeout {
            url: "http://x.com/".to_string(),
        });
        stats.record_failure(&FetchError::Status {
            url: "http://x.com/a".to_string(),
            status: 500,
        });

        assert_eq!(stats.pages_failed, 2);
        assert_eq!(stats.timeout_failures, 1);
    }

    #[test]
    fn test_duration_requires_both_ends() {
        let mut stats = CrawlStats::default();
        assert!(stats.duration().is_none());

        stats.mark_started();
        assert!(stats.duration().is_none());

        stats.mark_finished();
        let duration = stats.duration().unwrap();
        assert!(duration >= chrono::Duration::zero());
    }
}
