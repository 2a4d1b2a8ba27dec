//! Crawl orchestration
//!
//! The loop is intentionally sequential, single-flow per source: one URL
//! is fetched, extracted, and recorded before the next fetch begins.
//! Concurrent fetches would overwhelm both the rendering engine and the
//! target server. Two independent crawl runs may still run in parallel,
//! each owning its own session, frontier, and output collection.

use crate::browser::PageRenderer;
use crate::config::Config;
use crate::crawler::fetcher::fetch_page;
use crate::crawler::frontier::Frontier;
use crate::model::{CrawlProgress, ExtractedPage};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Drives one crawl run over a rendering session
pub struct Orchestrator {
    config: Config,
    run_id: String,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            run_id: Uuid::new_v4().to_string(),
        }
    }

    /// Identifier reported as `sourceId` in progress snapshots
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Runs the main crawl loop until the frontier drains, the page
    /// bound is reached, or cancellation is observed
    ///
    /// Cancellation is cooperative: it is checked at the top of each
    /// iteration, so a slow page still runs to its own timeout first.
    /// Already-completed pages are always returned.
    pub async fn run<R, F>(
        &self,
        renderer: &mut R,
        mut frontier: Frontier,
        mut on_progress: F,
        cancel: &CancellationToken,
    ) -> Vec<ExtractedPage>
    where
        R: PageRenderer + Send + ?Sized,
        F: FnMut(CrawlProgress),
    {
        let rate_limit = Duration::from_millis(self.config.crawler.request_delay_ms);
        let started = std::time::Instant::now();
        let mut pages: Vec<ExtractedPage> = Vec::new();

        tracing::info!(
            "Starting crawl run {} (bounded to {} pages)",
            self.run_id,
            self.config.crawler.max_pages
        );

        loop {
            if cancel.is_cancelled() {
                tracing::info!(
                    "Cancellation observed after {} pages, stopping gracefully",
                    pages.len()
                );
                break;
            }

            let url = match frontier.next_url() {
                Some(url) => url,
                None => {
                    tracing::info!("Frontier exhausted, crawl complete");
                    break;
                }
            };

            tracing::debug!("Processing {}", url);

            let (page, links) = fetch_page(
                &mut *renderer,
                &url,
                &self.config.crawler,
                &self.config.detection,
            )
            .await;

            let discovered = frontier.discover(&links);
            if discovered > 0 {
                tracing::debug!("Discovered {} new candidate URLs on {}", discovered, url);
            }

            pages.push(page);

            on_progress(CrawlProgress {
                source_id: self.run_id.clone(),
                pages_processed: pages.len(),
                total_pages: frontier.total_known(),
                current_page: url.to_string(),
                components_found: None,
            });

            // Politeness delay before the next fetch
            if frontier.has_work() && !cancel.is_cancelled() {
                tokio::time::sleep(rate_limit).await;
            }
        }

        let failed = pages.iter().filter(|page| page.is_error()).count();
        tracing::info!(
            "Crawl run {} finished: {} pages ({} failed) in {:.1}s",
            self.run_id,
            pages.len(),
            failed,
            started.elapsed().as_secs_f64()
        );

        pages
    }
}
