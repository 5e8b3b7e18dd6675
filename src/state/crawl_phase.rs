/// Crawl phase definitions for tracking traversal progress
///
/// This module defines the states a single crawl moves through.
use std::fmt;

/// Represents the current phase of a crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Normalized seed received, nothing fetched yet
    #[default]
    Start,

    /// The seed page is being fetched; its resolved URL fixes the boundary
    FetchingSeed,

    /// Worklist is being drained
    Draining,

    /// Terminal: the report is ready
    Done,
}

impl CrawlPhase {
    /// Returns true if this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the crawl may move from this phase to `next`
    ///
    /// Any non-terminal phase may jump to `Done` (seed failure, deadline).
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Start, Self::FetchingSeed)
                | (Self::FetchingSeed, Self::Draining)
                | (Self::Start | Self::FetchingSeed | Self::Draining, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::FetchingSeed => "fetching_seed",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
