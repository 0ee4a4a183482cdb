//! Resolution coordinator.
//!
//! Runs the cheap HTTP chain walk for every input and, when the caller allows
//! it, falls back to the shared browser for inputs whose markers are still
//! incomplete. Every input yields exactly one [`ResolutionResult`], in input
//! order.


use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use crate::app::validate_and_normalize_url;
use crate::browser::{BrowserResolver, SharedBrowser};
use crate::config::Config;
use crate::fetch::{ChainWalker, Fetcher};
use crate::models::{ResolutionResult, Source};

type PendingResult<'a> = Pin<Box<dyn Future<Output = ResolutionResult> + Send + 'a>>;

/// Resolves input URLs to their final destination and markers.
pub struct Resolver {
    walker: ChainWalker,
    browser: BrowserResolver,
    concurrency: usize,
}

impl Resolver {
    /// Builds a resolver around an HTTP client and a shared browser handle.
    ///
    /// The client must not follow redirects itself; use
    /// [`init_redirect_client`](crate::initialization::init_redirect_client).
    pub fn new(config: &Config, client: Arc<reqwest::Client>, browser: Arc<SharedBrowser>) -> Self {
        let fetcher = Fetcher::new(client, config.sniff_limit);
        Self {
            walker: ChainWalker::new(fetcher, config.max_hops),
            browser: BrowserResolver::new(config, browser),
            concurrency: config.concurrency.max(1),
        }
    }

    /// Resolves a single raw input.
    ///
    /// Invalid input becomes an error result. When the chain walk leaves a
    /// marker missing and `use_browser` is set, the browser is seeded with the
    /// chain's last URL and its observation replaces the chain result. If the
    /// browser itself cannot run, the chain result is kept with the error
    /// attached.
    pub async fn resolve_one(&self, raw: &str, use_browser: bool) -> ResolutionResult {
        let start = match validate_and_normalize_url(raw) {
            Ok(url) => url,
            Err(e) => {
                debug!("Rejected input {:?}: {}", raw, e);
                return ResolutionResult::failed(raw.trim(), e);
            }
        };

        let chain = self.walker.walk(&start).await;
        debug!(
            "Chain walk for {} stopped after {} hop(s): {}",
            start,
            chain.hops,
            chain.stop.as_str()
        );

        let chain_result = ResolutionResult::new(
            chain.final_url.to_string(),
            chain.markers.clone(),
            Source::Chain,
            chain.hops,
        );

        if chain.markers.is_complete() || !use_browser {
            return chain_result;
        }

        info!("Markers incomplete for {}, falling back to browser", start);
        match self.browser.resolve(&chain.final_url).await {
            Ok(outcome) => {
                if let Some(error) = &outcome.navigation_error {
                    debug!("Browser navigation for {} reported: {}", chain.final_url, error);
                }
                ResolutionResult::new(outcome.final_url, outcome.markers, Source::Browser, chain.hops)
            }
            Err(e) => {
                warn!("Browser fallback failed for {}: {}", start, e);
                chain_result.with_error(e)
            }
        }
    }

    /// Resolves a batch, preserving input order.
    ///
    /// Up to `concurrency` inputs are in flight at once; a failure on one input
    /// never affects the others.
    pub async fn resolve_batch(&self, inputs: &[String], use_browser: bool) -> Vec<ResolutionResult> {
        // Concrete boxed futures; a closure returning the borrowed future is not
        // general enough for axum's Handler bound
        let pending: Vec<PendingResult<'_>> = inputs
            .iter()
            .map(|raw| Box::pin(self.resolve_one(raw.as_str(), use_browser)) as PendingResult<'_>)
            .collect();
        stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await
    }
}
