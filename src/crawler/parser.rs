//! Pattern-based extraction of email addresses and links
//!
//! This module deliberately scans raw page text with regular expressions
//! instead of building a DOM. It tolerates malformed markup the same way it
//! misses oddly formatted anchors:
//! - Email addresses anywhere in the text, including `mailto:` hrefs
//! - `<a ... href="...">` links written with double quotes

use crate::url::{is_image_link, resolve_link, DomainBoundary};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Local part made of one or more dot-separated runs, then `@label.label`
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[A-Za-z0-9#\-_~!$&'()*+,;=:]+(?:\.[A-Za-z0-9#\-_~!$&'()*+,;=:]+)*@[A-Za-z0-9\-]+\.[A-Za-z0-9\-]+",
    )
    .expect("email pattern compiles")
});

/// Double-quoted href of an anchor tag, other attributes allowed before it
static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a[^<>]+href\s*=\s*"([^"]+)"#).expect("link pattern compiles")
});

const MAILTO_PREFIX: &str = "mailto:";

/// Extracted information from a fetched page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Every email-like match, in document order (may repeat)
    pub emails: Vec<String>,

    /// In-boundary, non-image absolute links (deduplicated)
    pub links: Vec<String>,
}

/// Parses a page body and extracts emails and followable links
///
/// Bodies that are not valid UTF-8 are decoded lossily.
///
/// # Arguments
///
/// * `body` - The raw response body
/// * `base_url` - Absolute URL of the page, used to resolve relative links
/// * `boundary` - The crawl's domain boundary
pub fn parse_page(body: &[u8], base_url: &str, boundary: &DomainBoundary) -> ParsedPage {
    let text = String::from_utf8_lossy(body);

    ParsedPage {
        emails: extract_emails(&text),
        links: extract_links(&text, base_url, boundary),
    }
}

/// Finds every email address in the text
///
/// A match that begins with `mailto:` has that prefix removed, so an address
/// only published as a mail link is still reported as a bare address. The
/// local-part alphabet includes `:`, so a doubled `mailto:mailto:` is
/// unwrapped completely.
///
/// # Example
///
/// ```
/// use mail_ripple::crawler::extract_emails;
///
/// let emails = extract_emails("contact a@b.co or mailto:c@d.org");
/// assert_eq!(emails, vec!["a@b.co", "c@d.org"]);
/// ```
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_PATTERN
        .find_iter(text)
        .map(|m| unwrap_mailto(m.as_str()).to_string())
        .collect()
}

/// Strips every leading `mailto:` from a matched address
fn unwrap_mailto(mut email: &str) -> &str {
    while let Some(rest) = email.strip_prefix(MAILTO_PREFIX) {
        email = rest;
    }
    email
}

/// Finds every anchor link in the text that the crawl may follow
///
/// # Rules
///
/// 1. Collect `<a ...href="LINK"` values and drop duplicates
/// 2. Resolve each against `base_url`; unresolvable links are dropped
/// 3. Keep links whose full string starts with the boundary prefix
/// 4. Drop links ending in `.png`, `.jpg` or `.gif`
///
/// # Example
///
/// ```
/// use mail_ripple::crawler::extract_links;
/// use mail_ripple::url::DomainBoundary;
///
/// let boundary = DomainBoundary::new("http://x.com/");
/// let links = extract_links(r#"<a href="b.html">B</a>"#, "http://x.com/a/", &boundary);
/// assert_eq!(links, vec!["http://x.com/a/b.html"]);
/// ```
pub fn extract_links(text: &str, base_url: &str, boundary: &DomainBoundary) -> Vec<String> {
    let mut raw_seen = HashSet::new();
    let mut resolved_seen = HashSet::new();
    let mut links = Vec::new();

    for capture in LINK_PATTERN.captures_iter(text) {
        let Some(raw) = capture.get(1).map(|m| m.as_str()) else {
            continue;
        };

        if !raw_seen.insert(raw) {
            continue;
        }

        let Some(absolute) = resolve_link(base_url, raw) else {
            tracing::trace!("Could not resolve link {} against {}", raw, base_url);
            continue;
        };

        if !boundary.contains(&absolute) || is_image_link(&absolute) {
            continue;
        }

        if resolved_seen.insert(absolute.clone()) {
            links.push(absolute);
        }
    }

    links
}
