//! Configuration module for Loupe
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every file section is optional; omitted fields fall back to the
//! crawl-policy defaults.
//!
//! # Example
//!
//! ```no_run
//! use loupe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("loupe.toml")).unwrap();
//! println!("Crawl bounded to {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserConfig, Config, CrawlerConfig, DetectionConfig, DiscoveryConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation
pub use validation::validate;
