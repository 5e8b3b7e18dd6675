//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with a browser-like user agent
//! - Single GET attempts through the [`Transport`] trait
//! - Retrying attempts that time out, up to a fixed attempt budget
//! - Error classification (timeout vs. everything else)

use crate::config::Config;
use crate::{FetchAttempt, FetchError};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

/// Maximum number of redirects followed for a single request
const MAX_REDIRECTS: usize = 10;

/// Body and final location of one successful GET
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// Raw response body
    pub body: Vec<u8>,
}

/// A single-attempt network primitive
///
/// Implementations perform exactly one request per call and report a
/// [`FetchError::Timeout`] for the transient timeout class so the
/// [`Fetcher`] can decide whether to try again.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one GET request against `url`
    async fn get(&self, url: &str) -> FetchAttempt<FetchedPage>;
}

/// Result of a fetch operation, after retries
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: Vec<u8>,
    },

    /// No attempts left or a non-retryable error occurred
    Failure {
        /// The error from the last attempt
        error: FetchError,
        /// How many attempts were made
        attempts: u32,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use mail_ripple::config::Config;
/// use mail_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.value.as_str())
        .timeout(config.crawler.request_timeout())
        .connect_timeout(config.crawler.connect_timeout())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Transport`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> FetchAttempt<FetchedPage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();

        // A server-side 408 is the same timeout class as a client-side one
        if status == StatusCode::REQUEST_TIMEOUT {
            return Err(FetchError::Timeout {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?;

        Ok(FetchedPage {
            final_url,
            body: body.to_vec(),
        })
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_builder() {
        FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: format!("Connection failed: {}", e),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

/// Fetches pages through a [`Transport`] with a bounded retry policy
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | Timeout (client-side or HTTP 408) | Retry until `max_attempts` total attempts |
/// | Any other HTTP status outside 2xx | Immediate failure |
/// | DNS / connection refused / TLS | Immediate failure |
/// | Malformed URL | Immediate failure |
///
/// Retries are immediate unless a backoff is configured.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    max_attempts: u32,
    backoff: Option<Duration>,
}

impl Fetcher {
    /// Creates a fetcher; an attempt budget of 0 is treated as 1
    pub fn new(transport: Arc<dyn Transport>, max_attempts: u32) -> Self {
        Self {
            transport,
            max_attempts: max_attempts.max(1),
            backoff: None,
        }
    }

    /// Sets a delay slept between timed-out attempts
    pub fn with_backoff(mut self, backoff: Option<Duration>) -> Self {
        self.backoff = backoff;
        self
    }

    /// Builds an HTTP-backed fetcher from the configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport), config.crawler.max_attempts)
            .with_backoff(config.crawler.retry_backoff()))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fetches a URL, retrying only on timeouts
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to fetch
    ///
    /// # Returns
    ///
    /// A FetchResult carrying either the page or the last error
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let mut attempt = 1;

        loop {
            match self.transport.get(url).await {
                Ok(page) => {
                    tracing::debug!("Fetched {} on attempt {}", url, attempt);
                    return FetchResult::Success {
                        final_url: page.final_url,
                        body: page.body,
                    };
                }
                Err(error) if error.is_timeout() && attempt < self.max_attempts => {
                    tracing::debug!(
                        "Attempt {}/{} timed out for {}, retrying",
                        attempt,
                        self.max_attempts,
                        url
                    );
                    if let Some(backoff) = self.backoff {
                        tokio::time::sleep(backoff).await;
                    }
                    attempt += 1;
                }
                Err(error) => {
                    return FetchResult::Failure {
                        error,
                        attempts: attempt,
                    };
                }
            }
        }
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("max_attempts", &self.max_attempts)
            .field("backoff", &self.backoff)
            .finish()
    }
}
