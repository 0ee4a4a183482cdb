// Shared test helpers: a scripted browser engine built on the public traits.
//
// Each scripted page reports its locations in order; the last one repeats.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use link_redirect::browser::{BrowserEngine, BrowserPage, EngineLauncher, SharedBrowser};

#[derive(Clone, Default)]
pub struct BrowserCalls {
    pub launches: Arc<AtomicUsize>,
    pub pages: Arc<AtomicUsize>,
    pub navigations: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)] // Not every test file inspects every counter
impl BrowserCalls {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn pages(&self) -> usize {
        self.pages.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

pub struct ScriptedLauncher {
    pages: Arc<Mutex<VecDeque<Vec<String>>>>,
    fail_launch: bool,
    calls: BrowserCalls,
}

impl ScriptedLauncher {
    /// Launcher whose engine hands out one scripted page per entry.
    pub fn new(pages: &[&[&str]]) -> Self {
        Self {
            pages: Arc::new(Mutex::new(
                pages
                    .iter()
                    .map(|p| p.iter().map(|u| u.to_string()).collect())
                    .collect(),
            )),
            fail_launch: false,
            calls: BrowserCalls::default(),
        }
    }

    #[allow(dead_code)]
    pub fn failing() -> Self {
        let mut launcher = Self::new(&[]);
        launcher.fail_launch = true;
        launcher
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> BrowserCalls {
        self.calls.clone()
    }

    pub fn into_shared(self) -> Arc<SharedBrowser> {
        Arc::new(SharedBrowser::new(Box::new(self)))
    }
}

#[async_trait]
impl EngineLauncher for ScriptedLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserEngine>> {
        self.calls.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            return Err(anyhow!("no browser installed"));
        }
        Ok(Box::new(ScriptedEngine {
            pages: Arc::clone(&self.pages),
            calls: self.calls.clone(),
        }))
    }
}

struct ScriptedEngine {
    pages: Arc<Mutex<VecDeque<Vec<String>>>>,
    calls: BrowserCalls,
}

#[async_trait]
impl BrowserEngine for ScriptedEngine {
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>> {
        let locations = self
            .pages
            .lock()
            .map_err(|_| anyhow!("poisoned"))?
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted page left"))?;
        self.calls.pages.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedPage {
            locations,
            reads: AtomicUsize::new(0),
            calls: self.calls.clone(),
        }))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

struct ScriptedPage {
    locations: Vec<String>,
    reads: AtomicUsize,
    calls: BrowserCalls,
}

#[async_trait]
impl BrowserPage for ScriptedPage {
    async fn set_user_agent(&self, _user_agent: &str) -> Result<()> {
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        self.calls
            .navigations
            .lock()
            .map_err(|_| anyhow!("poisoned"))?
            .push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        self.locations
            .get(n.min(self.locations.len().saturating_sub(1)))
            .cloned()
            .ok_or_else(|| anyhow!("no location"))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
