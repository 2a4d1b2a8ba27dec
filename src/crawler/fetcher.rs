//! Page fetching with bounded retries
//!
//! One URL moves through `Pending -> Fetching -> {Succeeded | retry |
//! Failed}`. A terminal failure never aborts the crawl: it is downgraded
//! to an error record so the output collection stays uniform.

use crate::browser::{PageRenderer, RenderError};
use crate::config::{CrawlerConfig, DetectionConfig};
use crate::extract::extract_document;
use crate::model::ExtractedPage;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

/// A failed fetch attempt for one URL
#[derive(Debug, Error)]
pub enum PageError {
    #[error("{0}")]
    Render(#[from] RenderError),
}

/// Fetches one URL, retrying up to the configured bound
///
/// A fixed delay (the same interval used for inter-request politeness)
/// separates attempts. After the final attempt fails, an error record is
/// synthesized carrying the last error message, and no links are
/// reported for the URL.
pub async fn fetch_page<R>(
    renderer: &mut R,
    url: &Url,
    crawler: &CrawlerConfig,
    detection: &DetectionConfig,
) -> (ExtractedPage, Vec<Url>)
where
    R: PageRenderer + Send + ?Sized,
{
    let retry_delay = Duration::from_millis(crawler.request_delay_ms);
    let mut last_error = String::from("fetch never attempted");

    for attempt in 1..=crawler.max_retries {
        match fetch_attempt(renderer, url, detection).await {
            Ok((page, links)) => {
                if attempt > 1 {
                    tracing::info!("Fetched {} on attempt {}", url, attempt);
                }
                return (page, links);
            }
            Err(e) => {
                tracing::warn!(
                    "Attempt {}/{} failed for {}: {}",
                    attempt,
                    crawler.max_retries,
                    url,
                    e
                );
                last_error = e.to_string();

                if attempt < crawler.max_retries {
                    tokio::time::sleep(retry_delay).await;
                }
            }
        }
    }

    tracing::error!(
        "Giving up on {} after {} attempts: {}",
        url,
        crawler.max_retries,
        last_error
    );
    (
        ExtractedPage::error_record(url.to_string(), last_error),
        Vec::new(),
    )
}

/// One render-and-extract attempt
///
/// The rendered source is parsed exactly once; extraction itself is
/// infallible, so a failed attempt always means the renderer failed.
async fn fetch_attempt<R>(
    renderer: &mut R,
    url: &Url,
    detection: &DetectionConfig,
) -> Result<(ExtractedPage, Vec<Url>), PageError>
where
    R: PageRenderer + Send + ?Sized,
{
    let started = Instant::now();

    let html = renderer.render(url).await?;
    let extracted = extract_document(&html, url, detection);

    let render_time_ms = started.elapsed().as_millis() as u64;

    let page = ExtractedPage::success(
        url.to_string(),
        extracted.text_content,
        extracted.semantic,
        extracted.metadata,
        extracted.code_samples,
        render_time_ms,
    );

    Ok((page, extracted.links))
}
