//! The process-wide browser engine handle.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
use tokio::sync::OnceCell;

use super::{BrowserEngine, EngineLauncher};
use crate::error_handling::ResolveError;

/// Lazily launched, shared browser engine.
///
/// [`acquire`](Self::acquire) starts the engine on first use and hands out the
/// same instance afterwards. Concurrent first calls wait on a single launch. A
/// failed launch is not cached, so a later request may try again.
/// [`shutdown`](Self::shutdown) closes the engine once; acquiring after that fails.
pub struct SharedBrowser {
    launcher: Box<dyn EngineLauncher>,
    engine: OnceCell<Box<dyn BrowserEngine>>,
    closed: AtomicBool,
}

impl SharedBrowser {
    pub fn new(launcher: Box<dyn EngineLauncher>) -> Self {
        Self {
            launcher,
            engine: OnceCell::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns the running engine, launching it if needed.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::BrowserLaunch` if the engine cannot be started or
    /// the handle has already been shut down.
    pub async fn acquire(&self) -> Result<&dyn BrowserEngine, ResolveError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ResolveError::BrowserLaunch(
                "browser has been shut down".to_string(),
            ));
        }
        let engine = self
            .engine
            .get_or_try_init(|| async {
                info!("Launching headless browser");
                self.launcher.launch().await
            })
            .await
            .map_err(|e| ResolveError::BrowserLaunch(format!("{e:#}")))?;
        Ok(engine.as_ref())
    }

    /// True once an engine has been launched successfully.
    pub fn is_started(&self) -> bool {
        self.engine.initialized()
    }

    /// Closes the engine if it was ever started. Safe to call more than once.
    pub async fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(engine) = self.engine.get() {
            info!("Closing headless browser");
            if let Err(e) = engine.close().await {
                warn!("Failed to close browser cleanly: {e:#}");
            }
        }
    }
}
