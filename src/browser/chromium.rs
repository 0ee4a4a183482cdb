//! Chromium engine using chromiumoxide.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::EventLifecycleEvent;
use chromiumoxide::page::Page;
use futures::StreamExt;
use log::debug;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use super::{BrowserEngine, BrowserPage, EngineLauncher};

/// Lifecycle event Chromium emits once at most two connections remain open.
const NETWORK_ALMOST_IDLE: &str = "networkAlmostIdle";

/// Upper bound on waiting for the network to settle after the load event.
const NETWORK_IDLE_WAIT: Duration = Duration::from_secs(5);

/// Launches headless Chromium.
///
/// Uses `executable` when given, otherwise chromiumoxide's own lookup
/// (`CHROME` env var, then the usual install locations).
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    executable: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self { executable }
    }
}

#[async_trait]
impl EngineLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserEngine>> {
        let mut builder = BrowserConfig::builder()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking");
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // The CDP connection only makes progress while its handler is polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Chromium handler event error: {e}");
                }
            }
        });

        Ok(Box::new(ChromiumEngine {
            browser: Mutex::new(browser),
            handler,
        }))
    }
}

struct ChromiumEngine {
    browser: Mutex<Browser>,
    handler: JoinHandle<()>,
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>> {
        let page = self
            .browser
            .lock()
            .await
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;
        Ok(Box::new(ChromiumPage { page }))
    }

    async fn close(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        browser.close().await.context("failed to close Chromium")?;
        match browser.wait().await {
            Ok(status) => debug!("Chromium exited with {status:?}"),
            Err(e) => debug!("Failed to wait for Chromium to exit: {e}"),
        }
        self.handler.abort();
        Ok(())
    }
}

struct ChromiumPage {
    page: Page,
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        self.page
            .set_user_agent(user_agent)
            .await
            .context("failed to set user agent")?;
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        // Subscribe first so idle events fired before goto returns are buffered
        let mut lifecycle = self
            .page
            .event_listener::<EventLifecycleEvent>()
            .await
            .context("failed to subscribe to lifecycle events")?;

        // goto resolves once the main frame has finished loading
        self.page.goto(url).await.context("navigation failed")?;

        let settled = timeout(NETWORK_IDLE_WAIT, async {
            while let Some(event) = lifecycle.next().await {
                if event.name == NETWORK_ALMOST_IDLE {
                    return true;
                }
            }
            false
        })
        .await;
        if !matches!(settled, Ok(true)) {
            debug!("Network did not settle for {url}, continuing after load");
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let href: String = self
            .page
            .evaluate("window.location.href")
            .await
            .context("failed to read location")?
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert location: {e:?}"))?;
        Ok(href)
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.page.close().await.context("failed to close page")?;
        Ok(())
    }
}
