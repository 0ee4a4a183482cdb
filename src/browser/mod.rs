//! Headless browser fallback.
//!
//! Some redirect chains only finish in a real scripting environment: the last
//! hop is computed by JavaScript after the page loads. This module drives a
//! browser engine for those cases.
//!
//! - [`SharedBrowser`] owns the single engine process, launched lazily on first use
//! - [`BrowserResolver`] opens one page per request, navigates, then watches the location
//! - [`ChromiumLauncher`] is the production engine (Chromium via chromiumoxide)
//!
//! The engine is abstracted behind [`EngineLauncher`], [`BrowserEngine`] and
//! [`BrowserPage`] so the resolver logic does not depend on a browser being
//! installed.

mod chromium;
mod resolver;
mod shared;

#[cfg(test)]
pub(crate) mod fake;

use anyhow::Result;
use async_trait::async_trait;

pub use chromium::ChromiumLauncher;
pub use resolver::{BrowserOutcome, BrowserResolver};
pub use shared::SharedBrowser;

/// Starts a browser engine process.
#[async_trait]
pub trait EngineLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserEngine>>;
}

/// A running browser engine shared by all requests.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Opens a new isolated page (tab).
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>>;
    /// Terminates the engine process.
    async fn close(&self) -> Result<()>;
}

/// A single page owned by one request.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    async fn set_user_agent(&self, user_agent: &str) -> Result<()>;
    /// Navigates and waits for the page to load.
    async fn navigate(&self, url: &str) -> Result<()>;
    /// The live `window.location.href`.
    async fn current_url(&self) -> Result<String>;
    async fn close(self: Box<Self>) -> Result<()>;
}
