use crate::config::DiscoveryConfig;
use url::Url;

/// File extensions that never point at a renderable documentation page
const ASSET_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "avif", "ico", "bmp", "css", "js", "mjs", "map",
    "woff", "woff2", "ttf", "otf", "eot", "pdf", "zip", "gz", "tar", "mp3", "mp4", "webm",
];

/// Decides which discovered links are worth visiting
///
/// A candidate URL is accepted only if every rule holds:
/// - same host as the crawl seed
/// - path does not end in a known asset extension
/// - path contains no literal `/api/` segment
/// - (policy) path contains one of the documentation section markers
/// - (policy) URL carries no query string
///
/// The section-marker allow-list biases crawling toward documentation
/// subtrees and away from marketing or account pages. Both policy rules
/// are explicit configuration rather than hard-coded behavior.
#[derive(Debug, Clone)]
pub struct DiscoveryFilter {
    seed_host: String,
    config: DiscoveryConfig,
}

impl DiscoveryFilter {
    /// Creates a filter scoped to the seed URL's host
    ///
    /// Returns None if the seed has no host (should have been rejected by
    /// normalization already).
    pub fn new(seed: &Url, config: DiscoveryConfig) -> Option<Self> {
        Some(Self {
            seed_host: seed.host_str()?.to_string(),
            config,
        })
    }

    /// Returns true if the URL passes every discovery rule
    pub fn accept(&self, url: &Url) -> bool {
        if url.host_str() != Some(self.seed_host.as_str()) {
            tracing::trace!("filter rejected (cross-origin): {}", url);
            return false;
        }

        let path = url.path().to_ascii_lowercase();

        if has_asset_extension(&path) {
            tracing::trace!("filter rejected (asset extension): {}", url);
            return false;
        }

        if has_api_segment(&path) {
            tracing::trace!("filter rejected (/api/ segment): {}", url);
            return false;
        }

        if self.config.skip_query_urls && url.query().is_some() {
            tracing::trace!("filter rejected (query string): {}", url);
            return false;
        }

        if self.config.docs_sections_only {
            let matched = self
                .config
                .section_markers
                .iter()
                .any(|marker| path.contains(marker.as_str()));
            if !matched {
                tracing::trace!("filter rejected (no docs marker): {}", url);
                return false;
            }
        }

        true
    }
}

/// Returns true if the path ends in a known non-document extension
fn has_asset_extension(path: &str) -> bool {
    match path.rsplit_once('.') {
        Some((_, ext)) => ASSET_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Returns true if any path segment is exactly `api`
fn has_api_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "api")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Url {
        Url::parse("https://example.com/docs/button").unwrap()
    }

    fn filter_with(config: DiscoveryConfig) -> DiscoveryFilter {
        DiscoveryFilter::new(&seed(), config).unwrap()
    }

    fn default_filter() -> DiscoveryFilter {
        filter_with(DiscoveryConfig::default())
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_accepts_same_origin_docs_path() {
        let filter = default_filter();
        assert!(filter.accept(&url("https://example.com/docs/input")));
    }

    #[test]
    fn test_rejects_cross_origin() {
        let filter = default_filter();
        assert!(!filter.accept(&url("https://other.com/docs/input")));
    }

    #[test]
    fn test_rejects_marketing_path() {
        // Same origin but outside any documentation subtree
        let filter = default_filter();
        assert!(!filter.accept(&url("https://example.com/about")));
    }

    #[test]
    fn test_rejects_asset_extensions() {
        let filter = default_filter();
        assert!(!filter.accept(&url("https://example.com/docs/logo.png")));
        assert!(!filter.accept(&url("https://example.com/docs/styles.css")));
        assert!(!filter.accept(&url("https://example.com/docs/bundle.js")));
        assert!(!filter.accept(&url("https://example.com/docs/manual.pdf")));
    }

    #[test]
    fn test_rejects_api_segment() {
        let filter = default_filter();
        assert!(!filter.accept(&url("https://example.com/api/tokens")));
        assert!(!filter.accept(&url("https://example.com/docs/api/list")));
    }

    #[test]
    fn test_api_reference_marker_is_not_api_segment() {
        // "api-reference" is a whole segment, not a literal /api/ segment
        let filter = default_filter();
        assert!(filter.accept(&url("https://example.com/api-reference/button")));
    }

    #[test]
    fn test_rejects_query_urls_by_default() {
        let filter = default_filter();
        assert!(!filter.accept(&url("https://example.com/docs/button?tab=props")));
    }

    #[test]
    fn test_query_urls_allowed_when_policy_off() {
        let config = DiscoveryConfig {
            skip_query_urls: false,
            ..Default::default()
        };
        let filter = filter_with(config);
        assert!(filter.accept(&url("https://example.com/docs/button?tab=props")));
    }

    #[test]
    fn test_allow_list_disabled() {
        let config = DiscoveryConfig {
            docs_sections_only: false,
            ..Default::default()
        };
        let filter = filter_with(config);
        assert!(filter.accept(&url("https://example.com/about")));
    }

    #[test]
    fn test_custom_markers() {
        let config = DiscoveryConfig {
            section_markers: vec!["handbook".to_string()],
            ..Default::default()
        };
        let filter = filter_with(config);
        assert!(filter.accept(&url("https://example.com/handbook/button")));
        assert!(!filter.accept(&url("https://example.com/docs/button")));
    }

    #[test]
    fn test_component_and_guide_markers() {
        let filter = default_filter();
        assert!(filter.accept(&url("https://example.com/components/input")));
        assert!(filter.accept(&url("https://example.com/guide/theming")));
        assert!(filter.accept(&url("https://example.com/design-system/colors")));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let filter = default_filter();
        assert!(!filter.accept(&url("https://example.com/docs/LOGO.PNG")));
    }
}
