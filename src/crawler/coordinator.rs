//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that:
//! - Fetches the seed page and fixes the domain boundary
//! - Drains the worklist with a bounded number of fetches in flight
//! - Marks links visited at discovery time
//! - Merges every page's emails into one result set

use crate::config::{validate, Config};
use crate::crawler::fetcher::{FetchResult, Fetcher};
use crate::crawler::parser::{parse_page, ParsedPage};
use crate::output::{log_statistics, CrawlStats};
use crate::state::{CrawlPhase, Frontier};
use crate::url::{normalize_domain, DomainBoundary};
use crate::FetchError;
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::task::JoinSet;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The normalized seed URL the crawl started from
    pub seed_url: String,

    /// Boundary fixed by the seed page, None if the seed failed
    pub boundary: Option<String>,

    /// Unique addresses found across all pages
    pub emails: BTreeSet<String>,

    /// Number of distinct URLs enqueued or fetched
    pub urls_visited: usize,

    /// True if the crawl deadline cut the traversal short
    pub deadline_reached: bool,

    /// Crawl counters
    pub stats: CrawlStats,
}

/// Outcome of one worklist fetch, produced inside a fetch task
enum PageOutcome {
    Parsed { final_url: String, page: ParsedPage },
    Failed { error: FetchError, attempts: u32 },
}

/// Main crawler coordinator structure
///
/// A coordinator owns all traversal state for one crawl and is consumed by
/// [`Coordinator::run`], so no visited set outlives its crawl.
#[derive(Debug)]
pub struct Coordinator {
    fetcher: Fetcher,
    max_concurrent: usize,
    deadline: Option<Duration>,
    phase: CrawlPhase,
    frontier: Frontier,
    emails: BTreeSet<String>,
    stats: CrawlStats,
}

impl Coordinator {
    /// Creates a sequential coordinator around a fetcher
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            max_concurrent: 1,
            deadline: None,
            phase: CrawlPhase::Start,
            frontier: Frontier::new(),
            emails: BTreeSet::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Creates a coordinator with an HTTP fetcher and the configured limits
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(reqwest::Error)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let fetcher = Fetcher::from_config(config)?;
        Ok(Self::new(fetcher)
            .with_max_concurrent(config.crawler.max_concurrent_fetches as usize)
            .with_deadline(config.crawler.crawl_deadline()))
    }

    /// Sets how many fetches may be in flight at once (minimum 1)
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Sets an overall time budget for the crawl
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs a crawl from an already normalized seed URL
    ///
    /// Never fails: a failed seed yields an empty report, failed pages are
    /// skipped, and an expired deadline returns what was found so far.
    pub async fn run(mut self, seed_url: &str) -> CrawlReport {
        tracing::info!("Starting crawl from {}", seed_url);
        self.stats.mark_started();

        let mut boundary = None;
        let deadline_reached = match self.deadline {
            Some(budget) => {
                let crawl = self.crawl(seed_url, &mut boundary);
                match tokio::time::timeout(budget, crawl).await {
                    Ok(()) => false,
                    Err(_) => {
                        tracing::warn!(
                            "Crawl deadline of {:?} reached, returning partial results",
                            budget
                        );
                        true
                    }
                }
            }
            None => {
                self.crawl(seed_url, &mut boundary).await;
                false
            }
        };

        self.enter(CrawlPhase::Done);
        self.stats.mark_finished();
        log_statistics(&self.stats, self.emails.len());

        CrawlReport {
            seed_url: seed_url.to_string(),
            boundary: boundary.map(|b: DomainBoundary| b.as_str().to_string()),
            emails: self.emails,
            urls_visited: self.frontier.visited_count(),
            deadline_reached,
            stats: self.stats,
        }
    }

    /// Fetches the seed, then drains the worklist
    ///
    /// Dropping this future aborts every fetch still in flight.
    async fn crawl(&mut self, seed_url: &str, boundary_out: &mut Option<DomainBoundary>) {
        self.enter(CrawlPhase::FetchingSeed);

        let (final_url, body) = match self.fetcher.fetch(seed_url).await {
            FetchResult::Success { final_url, body } => (final_url, body),
            FetchResult::Failure { error, attempts } => {
                tracing::warn!(
                    "Seed {} failed after {} attempt(s): {}",
                    seed_url,
                    attempts,
                    error
                );
                self.stats.record_failure(&error);
                return;
            }
        };
        self.stats.pages_fetched += 1;

        let boundary = DomainBoundary::new(final_url.as_str());
        tracing::info!("Crawl boundary fixed at {}", boundary.as_str());
        *boundary_out = Some(boundary.clone());

        self.frontier.mark_visited(seed_url);
        self.frontier.mark_visited(&final_url);
        let page = parse_page(&body, &final_url, &boundary);
        self.absorb(&final_url, page);

        self.enter(CrawlPhase::Draining);
        self.drain(&boundary).await;
    }

    /// Drains the worklist until it is empty and nothing is in flight
    ///
    /// Fetch tasks only fetch and parse; the visited set, worklist and result
    /// set are touched from this loop alone.
    async fn drain(&mut self, boundary: &DomainBoundary) {
        let mut in_flight = JoinSet::new();

        loop {
            while in_flight.len() < self.max_concurrent {
                let Some(url) = self.frontier.next_url() else {
                    break;
                };

                let fetcher = self.fetcher.clone();
                let boundary = boundary.clone();
                in_flight.spawn(async move {
                    let outcome = fetch_and_parse(&fetcher, &url, &boundary).await;
                    (url, outcome)
                });
            }

            match in_flight.join_next().await {
                Some(Ok((url, outcome))) => self.handle_outcome(&url, outcome),
                Some(Err(e)) => tracing::error!("Fetch task failed: {}", e),
                None => break,
            }
        }

        tracing::debug!("Worklist drained, {} URLs visited", self.frontier.visited_count());
    }

    fn handle_outcome(&mut self, url: &str, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Parsed { final_url, page } => {
                self.stats.pages_fetched += 1;
                if final_url != url && self.frontier.mark_visited(&final_url) {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }
                self.absorb(url, page);
            }
            PageOutcome::Failed { error, attempts } => {
                tracing::warn!(
                    "Skipping {} after {} attempt(s): {}",
                    url,
                    attempts,
                    error
                );
                self.stats.record_failure(&error);
            }
        }
    }

    /// Merges a parsed page into the result set and the worklist
    fn absorb(&mut self, url: &str, page: ParsedPage) {
        for email in page.emails {
            if !self.emails.contains(&email) {
                tracing::debug!("Found {} on {}", email, url);
                self.emails.insert(email);
            }
        }

        for link in page.links {
            if self.frontier.enqueue_if_unvisited(link) {
                self.stats.links_enqueued += 1;
            }
        }

        tracing::trace!(
            "{} processed, {} URLs pending",
            url,
            self.frontier.pending_count()
        );
    }

    fn enter(&mut self, next: CrawlPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid crawl phase transition {} -> {}",
            self.phase,
            next
        );
        tracing::trace!("Crawl phase {} -> {}", self.phase, next);
        self.phase = next;
    }
}

/// Fetches one worklist URL and extracts its contents
async fn fetch_and_parse(fetcher: &Fetcher, url: &str, boundary: &DomainBoundary) -> PageOutcome {
    match fetcher.fetch(url).await {
        FetchResult::Success { final_url, body } => {
            let page = parse_page(&body, &final_url, boundary);
            PageOutcome::Parsed { final_url, page }
        }
        FetchResult::Failure { error, attempts } => PageOutcome::Failed { error, attempts },
    }
}

/// Finds every email address published on a domain
///
/// Validates the configuration, normalizes the domain, builds an HTTP
/// coordinator and runs the crawl.
///
/// # Arguments
///
/// * `domain` - A domain or URL, with or without a scheme
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran (possibly finding nothing)
/// * `Err(MailRippleError)` - Invalid configuration, or the HTTP client could
///   not be built
///
/// # Example
///
/// ```no_run
/// use mail_ripple::config::Config;
/// use mail_ripple::crawler::find_email_addresses;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = find_email_addresses("example.com", &Config::default()).await?;
/// for email in &report.emails {
///     println!("{}", email);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn find_email_addresses(domain: &str, config: &Config) -> crate::Result<CrawlReport> {
    validate(config)?;

    let seed_url = normalize_domain(domain);
    let coordinator = Coordinator::from_config(config)?;
    Ok(coordinator.run(&seed_url).await)
}
