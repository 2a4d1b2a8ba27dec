//! Browser session management
//!
//! One WebDriver session is opened per crawl run and reused for every
//! page, amortizing startup cost. The [`PageRenderer`] trait is the seam
//! between the crawl loop and the real browser; tests substitute a
//! scripted renderer here.

use crate::config::BrowserConfig;
use crate::LoupeError;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use url::Url;

/// How often the document ready state is polled after navigation
const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Upper bound on ready-state polling before the settle delay starts
const READY_POLL_LIMIT: u32 = 50;

/// A failed attempt to render one page
///
/// Render errors are always absorbed by the retry controller; they never
/// abort a crawl.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("navigation to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("failed to retrieve page source for {url}: {message}")]
    Source { url: String, message: String },
}

/// Renders a URL to its post-hydration HTML source
///
/// The crawl loop is generic over this trait so the rendering engine can
/// be replaced wholesale in tests.
#[async_trait]
pub trait PageRenderer {
    async fn render(&mut self, url: &Url) -> Result<String, RenderError>;
}

/// A WebDriver-backed browser session
///
/// Owns one remote browser for the lifetime of a crawl run. The session
/// must be closed through [`BrowserSession::close`] exactly once.
pub struct BrowserSession {
    client: Client,
    navigation_timeout: Duration,
    settle_delay: Duration,
}

impl BrowserSession {
    /// Connects to the configured WebDriver endpoint
    ///
    /// Connection failure is a fatal setup error; there is no per-page
    /// fallback once a crawl has no browser at all.
    pub async fn connect(config: &BrowserConfig) -> Result<Self, LoupeError> {
        tracing::info!("Connecting to WebDriver at {}", config.webdriver_url);

        let client = ClientBuilder::native()
            .connect(&config.webdriver_url)
            .await?;

        Ok(Self {
            client,
            navigation_timeout: Duration::from_millis(config.navigation_timeout_ms),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        })
    }

    /// Closes the browser session
    ///
    /// A close failure only loses the remote session early, so it is
    /// logged rather than propagated.
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            tracing::warn!("Failed to close browser session cleanly: {}", e);
        }
    }

    /// Polls the document ready state until the page reports complete
    ///
    /// Best-effort: documentation sites that hydrate after load are given
    /// the settle delay afterwards regardless, so polling errors and
    /// timeouts are not failures.
    async fn wait_for_ready(&mut self, url: &Url) {
        for _ in 0..READY_POLL_LIMIT {
            match self
                .client
                .execute("return document.readyState", vec![])
                .await
            {
                Ok(state) if state.as_str() == Some("complete") => return,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!("Ready-state poll failed for {}: {}", url, e);
                    return;
                }
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }

        tracing::debug!("Page {} never reported readyState=complete", url);
    }
}

#[async_trait]
impl PageRenderer for BrowserSession {
    async fn render(&mut self, url: &Url) -> Result<String, RenderError> {
        match timeout(self.navigation_timeout, self.client.goto(url.as_str())).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(RenderError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(RenderError::Timeout {
                    url: url.to_string(),
                    timeout_ms: self.navigation_timeout.as_millis() as u64,
                })
            }
        }

        self.wait_for_ready(url).await;

        // Let deferred client-side rendering finish painting content
        tokio::time::sleep(self.settle_delay).await;

        self.client.source().await.map_err(|e| RenderError::Source {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
