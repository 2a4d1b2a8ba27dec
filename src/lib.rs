//! Loupe: a design-system documentation harvester
//!
//! This crate implements a browser-driven crawler for UI design-system
//! documentation sites. Each page is rendered in a WebDriver session and
//! distilled into a structured record of semantic content, page metadata,
//! and code samples with best-effort language identification.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Loupe operations
///
/// Only setup-time failures surface here: an unparsable seed URL or a
/// browser session that cannot be started. Per-page failures are absorbed
/// into error records and never abort a crawl.
#[derive(Debug, Error)]
pub enum LoupeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL: {0}")]
    InvalidSeedUrl(String),

    #[error("Failed to start browser session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Loupe operations
pub type Result<T> = std::result::Result<T, LoupeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::crawl;
pub use model::{CodeSample, CrawlProgress, ExtractedPage, PageMetadata, SemanticContent};
pub use url::normalize_url;
