use url::Url;

/// Scheme inserted in front of inputs that do not carry one
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Turns a user-supplied domain into an absolute URL string
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. If the input parses as an absolute URL with a host, keep it
/// 3. Otherwise prefix `http://` and parse again
/// 4. If that still fails, return the prefixed string unchanged
///
/// There is no error path: a malformed input produces a URL the fetcher will
/// reject, which ends the crawl with no results.
///
/// Inputs like `localhost:8080` parse as a URL with scheme `localhost` and no
/// host, so they take the prefixing path as well.
///
/// # Examples
///
/// ```
/// use mail_ripple::url::normalize_domain;
///
/// assert_eq!(normalize_domain("example.com"), "http://example.com/");
/// assert_eq!(normalize_domain("https://example.com/about"), "https://example.com/about");
/// ```
pub fn normalize_domain(input: &str) -> String {
    let input = input.trim();

    if let Ok(url) = Url::parse(input) {
        if url.has_host() {
            return url.to_string();
        }
    }

    let prefixed = format!("{}{}", DEFAULT_SCHEME_PREFIX, input);
    match Url::parse(&prefixed) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::debug!("Seed {} is not a valid URL: {}", prefixed, e);
            prefixed
        }
    }
}

/// Resolves a raw `href` value against the absolute URL of the page it was on
///
/// Handles relative paths, root-relative paths, protocol-relative links and
/// already-absolute links. Returns None if the base or the join is invalid.
///
/// # Examples
///
/// ```
/// use mail_ripple::url::resolve_link;
///
/// assert_eq!(
///     resolve_link("http://x.com/a/", "b.html"),
///     Some("http://x.com/a/b.html".to_string())
/// );
/// ```
pub fn resolve_link(base_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    base.join(href).ok().map(|url| url.to_string())
}
