//! Per-request browser resolution.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::time::{timeout, Instant};
use url::Url;

use super::{BrowserPage, SharedBrowser};
use crate::app::is_web_url;
use crate::config::Config;
use crate::error_handling::ResolveError;
use crate::markers::{extract_markers, Markers};

/// What the browser observed for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOutcome {
    /// Last location seen during navigation and the observation window.
    pub final_url: String,
    pub markers: Markers,
    /// Set when navigation failed or timed out; resolution still proceeds
    /// with whatever location the page reached.
    pub navigation_error: Option<String>,
}

/// Resolves URLs in the shared browser, one fresh page per call.
pub struct BrowserResolver {
    shared: Arc<SharedBrowser>,
    user_agent: String,
    navigation_timeout: Duration,
    observe_window: Duration,
    poll_interval: Duration,
}

impl BrowserResolver {
    pub fn new(config: &Config, shared: Arc<SharedBrowser>) -> Self {
        Self {
            shared,
            user_agent: config.user_agent.clone(),
            navigation_timeout: config.request_timeout(),
            observe_window: config.observe_window(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Opens a page, navigates to `start`, watches the location for the
    /// observation window and extracts markers from where it ended up.
    ///
    /// The page is always closed before returning.
    ///
    /// # Errors
    ///
    /// Only engine-level failures are errors: `BrowserLaunch` when the shared
    /// engine cannot start, `BrowserPage` when no page can be opened.
    pub async fn resolve(&self, start: &Url) -> Result<BrowserOutcome, ResolveError> {
        let engine = self.shared.acquire().await?;
        let page = engine
            .new_page()
            .await
            .map_err(|e| ResolveError::BrowserPage(format!("{e:#}")))?;

        let outcome = self.observe(page.as_ref(), start).await;

        if let Err(e) = page.close().await {
            debug!("Failed to close page for {}: {e:#}", start);
        }
        Ok(outcome)
    }

    async fn observe(&self, page: &dyn BrowserPage, start: &Url) -> BrowserOutcome {
        if let Err(e) = page.set_user_agent(&self.user_agent).await {
            debug!("Failed to set user agent: {e:#}");
        }

        let navigation_error = match timeout(self.navigation_timeout, page.navigate(start.as_str()))
            .await
        {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(format!("{e:#}")),
            Err(_) => Some(format!(
                "navigation timed out after {}ms",
                self.navigation_timeout.as_millis()
            )),
        };
        if let Some(error) = &navigation_error {
            debug!("Navigation to {} did not settle: {}", start, error);
        }

        let mut location = self
            .read_location(page)
            .await
            .unwrap_or_else(|| start.to_string());

        let deadline = Instant::now() + self.observe_window;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
            if let Some(current) = self.read_location(page).await {
                if current != location {
                    debug!("Location changed: {} -> {}", location, current);
                    location = current;
                }
            }
        }

        let markers = Url::parse(&location)
            .map(|url| extract_markers(&url))
            .unwrap_or_default();

        BrowserOutcome {
            final_url: location,
            markers,
            navigation_error,
        }
    }

    /// Reads the live location. Only http(s) locations count: `about:blank`
    /// and Chromium's `chrome-error://` pages are ignored, as are unreadable
    /// states.
    async fn read_location(&self, page: &dyn BrowserPage) -> Option<String> {
        match timeout(self.navigation_timeout, page.current_url()).await {
            Ok(Ok(url)) if Url::parse(&url).is_ok_and(|u| is_web_url(&u)) => Some(url),
            Ok(Ok(url)) => {
                debug!("Ignoring non-http location {url:?}");
                None
            }
            Ok(Err(e)) => {
                debug!("Failed to read location: {e:#}");
                None
            }
            Err(_) => None,
        }
    }
}
