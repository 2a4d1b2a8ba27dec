//! Loupe main entry point
//!
//! Command-line interface for the design-system documentation harvester.

use anyhow::Context;
use clap::Parser;
use loupe::config::{load_config_with_hash, Config};
use loupe::crawler::crawl;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Loupe: a design-system documentation harvester
///
/// Renders documentation pages in a WebDriver-controlled browser and
/// extracts semantic content, metadata, and code samples into a single
/// JSON document.
#[derive(Parser, Debug)]
#[command(name = "loupe")]
#[command(version)]
#[command(about = "A design-system documentation harvester", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed_url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the maximum number of pages to crawl
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Override the WebDriver endpoint
    #[arg(long, value_name = "URL")]
    webdriver_url: Option<String>,

    /// Write extracted pages to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Validate configuration, print the resolved settings, and exit
    #[arg(long)]
    show_config: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            );
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(webdriver_url) = cli.webdriver_url {
        config.browser.webdriver_url = webdriver_url;
    }

    if cli.show_config {
        print_config(&cli.seed_url, &config);
        return Ok(());
    }

    // Ctrl-C requests cooperative cancellation; the current page is
    // allowed to finish and whatever completed so far is still written.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing the current page before stopping");
            signal_token.cancel();
        }
    });

    let pages = crawl(
        &config,
        &cli.seed_url,
        |progress| {
            tracing::info!(
                "[{}/{}] {}",
                progress.pages_processed,
                progress.total_pages,
                progress.current_page
            );
        },
        &cancel,
    )
    .await?;

    let failed = pages.iter().filter(|page| page.is_error()).count();
    tracing::info!(
        "Extracted {} pages ({} failed) from {}",
        pages.len(),
        failed,
        cli.seed_url
    );

    let json = serde_json::to_string_pretty(&pages).context("Failed to serialize records")?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} records to {}", pages.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Prints the resolved configuration without crawling anything
fn print_config(seed_url: &str, config: &Config) {
    println!("=== Loupe Configuration ===\n");
    println!("Seed URL: {}", seed_url);

    println!("\nCrawler:");
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Max pages: {}", config.crawler.max_pages);

    println!("\nBrowser:");
    println!("  WebDriver: {}", config.browser.webdriver_url);
    println!(
        "  Navigation timeout: {}ms",
        config.browser.navigation_timeout_ms
    );
    println!("  Settle delay: {}ms", config.browser.settle_delay_ms);

    println!("\nDiscovery:");
    println!(
        "  Docs sections only: {}",
        config.discovery.docs_sections_only
    );
    println!("  Skip query URLs: {}", config.discovery.skip_query_urls);
    println!(
        "  Section markers: {}",
        config.discovery.section_markers.join(", ")
    );

    println!("\nDetection:");
    println!("  Min code length: {}", config.detection.min_code_length);
    println!("  Min relevance: {}", config.detection.min_relevance);
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("loupe=info,warn"),
            1 => EnvFilter::new("loupe=debug,info"),
            2 => EnvFilter::new("loupe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
