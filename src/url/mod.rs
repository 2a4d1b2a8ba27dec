//! URL handling for the crawler
//!
//! This module provides URL normalization and the discovery filter that
//! decides which candidate links are worth visiting.

mod filter;
mod normalize;

pub use filter::DiscoveryFilter;
pub use normalize::normalize_url;
