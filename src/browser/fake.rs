//! In-memory browser engine for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::{BrowserEngine, BrowserPage, EngineLauncher};

/// What a fake page reports, in order, on each `current_url` call.
/// The last entry repeats once the script is exhausted.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedPage {
    locations: Vec<String>,
    navigation_error: Option<String>,
}

impl ScriptedPage {
    pub(crate) fn fixed(url: &str) -> Self {
        Self::sequence(&[url])
    }

    pub(crate) fn sequence(urls: &[&str]) -> Self {
        Self {
            locations: urls.iter().map(|u| u.to_string()).collect(),
            navigation_error: None,
        }
    }

    pub(crate) fn failing_navigation(mut self, message: &str) -> Self {
        self.navigation_error = Some(message.to_string());
        self
    }
}

#[derive(Default)]
pub(crate) struct Counters {
    pub(crate) launches: Arc<AtomicUsize>,
    pub(crate) closes: Arc<AtomicUsize>,
    pub(crate) pages_opened: Arc<AtomicUsize>,
    pub(crate) pages_closed: Arc<AtomicUsize>,
    pub(crate) user_agents: Arc<Mutex<Vec<String>>>,
    pub(crate) navigations: Arc<Mutex<Vec<String>>>,
}

pub(crate) struct FakeLauncher {
    pages: Arc<Mutex<VecDeque<ScriptedPage>>>,
    launch_delay: Duration,
    launch_error: Option<String>,
    counters: Arc<Counters>,
}

impl FakeLauncher {
    pub(crate) fn new(pages: Vec<ScriptedPage>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages.into())),
            launch_delay: Duration::ZERO,
            launch_error: None,
            counters: Arc::new(Counters::default()),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        let mut launcher = Self::new(vec![]);
        launcher.launch_error = Some(message.to_string());
        launcher
    }

    pub(crate) fn with_launch_delay(mut self, delay: Duration) -> Self {
        self.launch_delay = delay;
        self
    }

    pub(crate) fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }

    pub(crate) fn launches(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.counters.launches)
    }

    pub(crate) fn closes(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.counters.closes)
    }
}

#[async_trait]
impl EngineLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserEngine>> {
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        if !self.launch_delay.is_zero() {
            tokio::time::sleep(self.launch_delay).await;
        }
        if let Some(message) = &self.launch_error {
            return Err(anyhow!("{message}"));
        }
        Ok(Box::new(FakeEngine {
            pages: Arc::clone(&self.pages),
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct FakeEngine {
    pages: Arc<Mutex<VecDeque<ScriptedPage>>>,
    counters: Arc<Counters>,
}

#[async_trait]
impl BrowserEngine for FakeEngine {
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>> {
        let script = self
            .pages
            .lock()
            .map_err(|_| anyhow!("fake page queue poisoned"))?
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted page left"))?;
        self.counters.pages_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePage {
            script,
            reads: AtomicUsize::new(0),
            counters: Arc::clone(&self.counters),
        }))
    }

    async fn close(&self) -> Result<()> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FakePage {
    script: ScriptedPage,
    reads: AtomicUsize,
    counters: Arc<Counters>,
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        self.counters
            .user_agents
            .lock()
            .map_err(|_| anyhow!("poisoned"))?
            .push(user_agent.to_string());
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        self.counters
            .navigations
            .lock()
            .map_err(|_| anyhow!("poisoned"))?
            .push(url.to_string());
        match &self.script.navigation_error {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(()),
        }
    }

    async fn current_url(&self) -> Result<String> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        let locations = &self.script.locations;
        locations
            .get(n.min(locations.len().saturating_sub(1)))
            .cloned()
            .ok_or_else(|| anyhow!("page has no location"))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.counters.pages_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
