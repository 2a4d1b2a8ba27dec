use crate::config::types::{BrowserConfig, Config, CrawlerConfig, DetectionConfig, DiscoveryConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_browser_config(&config.browser)?;
    validate_discovery_config(&config.discovery)?;
    validate_detection_config(&config.detection)?;
    Ok(())
}

/// Validates crawl loop configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.request_delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "request-delay-ms must be >= 100ms to stay polite, got {}ms",
            config.request_delay_ms
        )));
    }

    Ok(())
}

/// Validates browser session configuration
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.webdriver_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid webdriver-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "webdriver-url must be HTTP(S), got scheme '{}'",
            url.scheme()
        )));
    }

    if config.navigation_timeout_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "navigation-timeout-ms must be >= 1000ms, got {}ms",
            config.navigation_timeout_ms
        )));
    }

    if config.settle_delay_ms >= config.navigation_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "settle-delay-ms ({}ms) must be smaller than navigation-timeout-ms ({}ms)",
            config.settle_delay_ms, config.navigation_timeout_ms
        )));
    }

    Ok(())
}

/// Validates discovery policy
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.docs_sections_only && config.section_markers.is_empty() {
        return Err(ConfigError::Validation(
            "docs-sections-only is enabled but section-markers is empty; \
             no link would ever be followed"
                .to_string(),
        ));
    }

    for marker in &config.section_markers {
        if marker.trim().is_empty() {
            return Err(ConfigError::Validation(
                "section-markers must not contain empty entries".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates detection thresholds
fn validate_detection_config(config: &DetectionConfig) -> Result<(), ConfigError> {
    if config.min_relevance > 100 {
        return Err(ConfigError::Validation(format!(
            "min-relevance must be <= 100, got {}",
            config.min_relevance
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_zero_retries_rejected() {
        let mut config = Config::default();
        config.crawler.max_retries = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_tiny_request_delay_rejected() {
        let mut config = Config::default();
        config.crawler.request_delay_ms = 10;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_webdriver_url_rejected() {
        let mut config = Config::default();
        config.browser.webdriver_url = "not a url".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_non_http_webdriver_url_rejected() {
        let mut config = Config::default();
        config.browser.webdriver_url = "unix:///tmp/driver.sock".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_settle_delay_must_fit_in_timeout() {
        let mut config = Config::default();
        config.browser.settle_delay_ms = 40_000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_markers_with_allow_list_rejected() {
        let mut config = Config::default();
        config.discovery.section_markers.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_markers_ok_when_allow_list_off() {
        let mut config = Config::default();
        config.discovery.docs_sections_only = false;
        config.discovery.section_markers.clear();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_excessive_min_relevance_rejected() {
        let mut config = Config::default();
        config.detection.min_relevance = 250;
        assert!(validate(&config).is_err());
    }
}
