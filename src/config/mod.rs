//! Configuration module for Mail-Ripple
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a crawl can run without
//! any file at all.
//!
//! # Example
//!
//! ```no_run
//! use mail_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mail-ripple.toml")).unwrap();
//! println!("Fetch attempts per page: {}", config.crawler.max_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, UserAgentConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
