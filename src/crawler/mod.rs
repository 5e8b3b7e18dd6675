//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry-on-timeout
//! - Pattern-based email and link extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{find_email_addresses, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, FetchResult, FetchedPage, Fetcher, HttpTransport, Transport};
pub use parser::{extract_emails, extract_links, parse_page, ParsedPage};
