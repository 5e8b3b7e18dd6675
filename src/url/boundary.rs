/// File suffixes that are never followed
const IMAGE_SUFFIXES: &[&str] = &[".png", ".jpg", ".gif"];

/// The URL prefix a crawl is confined to
///
/// The boundary is fixed from the resolved URL of the first page fetched. A
/// link is in scope when its full string starts with the boundary string.
/// This is a raw prefix test, not a hostname comparison: a boundary of
/// `http://x.com` also admits `http://x.com.evil.com/`, and a link to
/// `https://x.com/` is out of scope for a boundary of `http://x.com/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainBoundary {
    prefix: String,
}

impl DomainBoundary {
    /// Creates a boundary from the resolved URL of the seed page
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns true if the absolute link falls inside the boundary
    pub fn contains(&self, link: &str) -> bool {
        link.starts_with(&self.prefix)
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }
}

/// Returns true if the link's last four characters name an image file
///
/// The comparison is case-sensitive, so `photo.PNG` is still followed.
pub fn is_image_link(link: &str) -> bool {
    IMAGE_SUFFIXES.iter().any(|suffix| link.ends_with(suffix))
}
