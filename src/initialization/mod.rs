//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP client (redirects disabled, request-scoped timeout)
//! - The resolver, wired to a lazily launched shared browser

mod client;
mod logger;

use std::sync::Arc;

use crate::browser::{ChromiumLauncher, SharedBrowser};
use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::resolve::Resolver;

// Re-export public API
pub use client::init_redirect_client;
pub use logger::init_logger_with;

/// Initializes the shared browser handle.
///
/// Nothing is launched here; Chromium starts on the first request that needs
/// the browser fallback.
pub fn init_shared_browser(config: &Config) -> Arc<SharedBrowser> {
    Arc::new(SharedBrowser::new(Box::new(ChromiumLauncher::new(
        config.chrome_executable.clone(),
    ))))
}

/// Builds a [`Resolver`] with a fresh HTTP client and the given browser handle.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the HTTP client cannot be built.
pub fn init_resolver(
    config: &Config,
    browser: Arc<SharedBrowser>,
) -> Result<Resolver, InitializationError> {
    let client = init_redirect_client(config)?;
    Ok(Resolver::new(config, client, browser))
}
