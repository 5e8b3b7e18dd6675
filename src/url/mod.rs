//! URL handling module for Mail-Ripple
//!
//! This module provides seed normalization, relative link resolution, and the
//! same-domain boundary test used to keep a crawl on one site.

mod boundary;
mod normalize;

// Re-export main functions
pub use boundary::{is_image_link, DomainBoundary};
pub use normalize::{normalize_domain, resolve_link};
