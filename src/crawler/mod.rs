//! The crawl loop
//!
//! This module contains the core crawling logic:
//! - Frontier management (BFS queue, dedup, page bound)
//! - Page fetching with bounded retries
//! - Orchestration: session lifecycle, rate limiting, progress,
//!   cooperative cancellation

mod fetcher;
mod frontier;
mod orchestrator;

pub use fetcher::{fetch_page, PageError};
pub use frontier::Frontier;
pub use orchestrator::Orchestrator;

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::model::{CrawlProgress, ExtractedPage};
use crate::url::{normalize_url, DiscoveryFilter};
use crate::{LoupeError, Result};
use tokio_util::sync::CancellationToken;

/// Crawls a documentation site starting from the seed URL
///
/// One browser session is opened for the whole run and closed on every
/// exit path. `on_progress` is invoked synchronously once per completed
/// page (success or error).
///
/// # Errors
///
/// Only setup failures surface here: an invalid seed URL or a browser
/// session that cannot be started. Per-page failures become error
/// records inside the returned collection.
pub async fn crawl<F>(
    config: &Config,
    seed_url: &str,
    on_progress: F,
    cancel: &CancellationToken,
) -> Result<Vec<ExtractedPage>>
where
    F: FnMut(CrawlProgress),
{
    let seed = normalize_url(seed_url)
        .map_err(|e| LoupeError::InvalidSeedUrl(format!("{}: {}", seed_url, e)))?;

    let filter = DiscoveryFilter::new(&seed, config.discovery.clone())
        .ok_or_else(|| LoupeError::InvalidSeedUrl(seed_url.to_string()))?;
    let frontier = Frontier::new(seed, filter, config.crawler.max_pages);

    let mut session = BrowserSession::connect(&config.browser).await?;

    let orchestrator = Orchestrator::new(config.clone());
    let pages = orchestrator
        .run(&mut session, frontier, on_progress, cancel)
        .await;

    // The loop absorbs every per-page failure, so this runs on every
    // exit path: normal completion, exhausted frontier, or cancellation.
    session.close().await;

    Ok(pages)
}
