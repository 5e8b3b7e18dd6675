//! Mail-Ripple: a same-domain email address finder
//!
//! This crate crawls a website starting from a single domain, following
//! hyperlinks that stay inside the seed page's URL prefix, and collects every
//! email-like string published on the pages it reaches.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Mail-Ripple operations
#[derive(Debug, Error)]
pub enum MailRippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors produced by a single fetch attempt
///
/// Only [`FetchError::Timeout`] is considered transient; the fetcher retries
/// it and gives up immediately on every other variant.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl FetchError {
    /// Returns true if the error belongs to the retryable timeout class
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The URL the failed attempt was made against
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Network { url, .. }
            | Self::InvalidUrl { url, .. } => url,
        }
    }
}

/// Result type alias for Mail-Ripple operations
pub type Result<T> = std::result::Result<T, MailRippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for single fetch attempts
pub type FetchAttempt<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{find_email_addresses, Coordinator, CrawlReport};
pub use state::CrawlPhase;
pub use crate::url::{normalize_domain, DomainBoundary};
