use serde::Deserialize;

/// Main configuration structure for Loupe
///
/// The bounded policy constants of the crawl pipeline live here. They are
/// fixed policy during a run, but every one of them is overridable through
/// the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
}

/// Crawl loop behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Fixed delay between page fetches (milliseconds); also used as the
    /// inter-retry delay
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Total fetch attempts per page before an error record is produced
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Maximum number of pages fetched in a single crawl run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            max_retries: default_max_retries(),
            max_pages: default_max_pages(),
        }
    }
}

/// Browser session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// WebDriver endpoint the session connects to
    #[serde(rename = "webdriver-url", default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Hard bound on a single page navigation (milliseconds)
    #[serde(
        rename = "navigation-timeout-ms",
        default = "default_navigation_timeout_ms"
    )]
    pub navigation_timeout_ms: u64,

    /// Wait after the document settles, so client-side hydration can finish
    /// painting content before extraction (milliseconds)
    #[serde(rename = "settle-delay-ms", default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

/// Link discovery policy
///
/// The allow-list and query-string rules are explicit policy switches; the
/// observed behavior of documentation crawlers varies here, so neither rule
/// is hard-coded.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Only follow links whose path contains one of the section markers
    #[serde(rename = "docs-sections-only", default = "default_true")]
    pub docs_sections_only: bool,

    /// Path fragments that mark documentation subtrees
    #[serde(rename = "section-markers", default = "default_section_markers")]
    pub section_markers: Vec<String>,

    /// Skip candidate URLs that carry a query string
    #[serde(rename = "skip-query-urls", default = "default_true")]
    pub skip_query_urls: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            docs_sections_only: true,
            section_markers: default_section_markers(),
            skip_query_urls: true,
        }
    }
}

/// Statistical language detection thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Minimum trimmed code length before the statistical classifier runs
    #[serde(rename = "min-code-length", default = "default_min_code_length")]
    pub min_code_length: usize,

    /// Minimum relevance score for a detection to be accepted
    #[serde(rename = "min-relevance", default = "default_min_relevance")]
    pub min_relevance: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_code_length: default_min_code_length(),
            min_relevance: default_min_relevance(),
        }
    }
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_max_retries() -> u32 {
    3
}

fn default_max_pages() -> usize {
    50
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_settle_delay_ms() -> u64 {
    1500
}

fn default_true() -> bool {
    true
}

fn default_section_markers() -> Vec<String> {
    [
        "docs",
        "documentation",
        "components",
        "component",
        "design-system",
        "design",
        "ui",
        "patterns",
        "guide",
        "guidelines",
        "foundations",
        "tokens",
        "api-reference",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_min_code_length() -> usize {
    20
}

fn default_min_relevance() -> u32 {
    5
}
