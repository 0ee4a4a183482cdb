//! Batch and server entry points used by the binary.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::AsyncReadExt;

use crate::app::{
    parse_url_list, print_batch_statistics, shutdown_gracefully, shutdown_signal,
    BatchStatistics,
};
use crate::config::Config;
use crate::export::write_results;
use crate::initialization::{init_resolver, init_shared_browser};
use crate::models::ResolutionResult;

/// Outcome of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Per-input results, in input order
    pub results: Vec<ResolutionResult>,
    pub statistics: BatchStatistics,
    pub elapsed_seconds: f64,
}

/// Reads the whole URL list from `path`, or from stdin when `path` is `-`.
async fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        info!("Reading URLs from stdin");
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read URLs from stdin")?;
        Ok(text)
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()))
    }
}

/// Resolves every URL in the configured input and writes the results.
///
/// The shared browser (if it was ever started) is closed before returning,
/// including when the run is interrupted by SIGINT/SIGTERM.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the HTTP client cannot be
/// built, the output cannot be written, or the run is interrupted.
pub async fn run_batch(config: Config) -> Result<BatchReport> {
    let started = Instant::now();

    let text = read_input(&config.file).await?;
    let urls = parse_url_list(&text);
    if urls.is_empty() {
        warn!("No URLs found in input");
    }

    let browser = init_shared_browser(&config);
    let resolver = init_resolver(&config, Arc::clone(&browser))
        .context("Failed to initialize resolver")?;

    info!(
        "Resolving {} URL{} (browser fallback {})",
        urls.len(),
        if urls.len() == 1 { "" } else { "s" },
        if config.browser { "on" } else { "off" }
    );

    let results = tokio::select! {
        results = resolver.resolve_batch(&urls, config.browser) => results,
        _ = shutdown_signal() => {
            shutdown_gracefully(&browser).await;
            anyhow::bail!("Interrupted before all URLs were resolved");
        }
    };
    shutdown_gracefully(&browser).await;

    write_results(&results, config.output_format, config.output.as_deref())
        .context("Failed to write results")?;

    let statistics = BatchStatistics::from_results(&results);
    let elapsed_seconds = started.elapsed().as_secs_f64();
    print_batch_statistics(&statistics, elapsed_seconds);

    Ok(BatchReport {
        results,
        statistics,
        elapsed_seconds,
    })
}

/// Runs the HTML view server on `port` until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the port cannot be bound.
pub async fn run_server(config: Config, port: u16) -> Result<()> {
    let browser = init_shared_browser(&config);
    let resolver = init_resolver(&config, Arc::clone(&browser))
        .context("Failed to initialize resolver")?;
    crate::server::serve(port, Arc::new(resolver), browser).await
}
