//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the phase of one crawl (start, fetching seed, draining, done)
//! - `Frontier`: the visited set and worklist owned by one crawl

mod crawl_phase;
mod frontier;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use frontier::Frontier;
