//! Output module for crawl results
//!
//! This module handles:
//! - Rendering the email report printed on stdout
//! - Recording and logging crawl statistics

mod report;
pub mod stats;

pub use report::{write_email_report, REPORT_HEADER};
pub use stats::{log_statistics, CrawlStats};
