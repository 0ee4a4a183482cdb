//! Redirect chain walking.
//!
//! Follows a chain hop by hop: HTTP 3xx `Location` targets, and for `200 OK`
//! pages, client-side redirects found by the sniffer. Markers are checked on
//! every URL visited and the walk stops as soon as both are known.
//!
//! Cycles are not detected. A chain that revisits a URL keeps going until the
//! hop limit is spent, which bounds every walk to `max_hops` fetches.

use log::{debug, warn};
use url::Url;

use crate::app::is_web_url;
use crate::error_handling::FetchFailure;
use crate::markers::{extract_markers, Markers};
use crate::sniff::sniff_redirect;

use super::{FetchOutcome, Fetcher};

/// Why a chain walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStop {
    /// Both markers were found.
    MarkersFound,
    /// `max_hops` hops were followed; markers may be incomplete.
    HopLimit,
    /// The last fetch failed (timeout, connection error, ...).
    FetchFailed(FetchFailure),
    /// A 200 page with no recognizable client-side redirect.
    NoRedirect,
    /// A status that is neither 200 nor a followable redirect.
    Terminal(u16),
}

impl ChainStop {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainStop::MarkersFound => "markers found",
            ChainStop::HopLimit => "hop limit reached",
            ChainStop::FetchFailed(_) => "fetch failed",
            ChainStop::NoRedirect => "no redirect found",
            ChainStop::Terminal(_) => "terminal status",
        }
    }
}

/// What a chain walk learned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    /// The last URL reached.
    pub final_url: Url,
    /// Markers accumulated over every URL visited.
    pub markers: Markers,
    /// Hops followed.
    pub hops: usize,
    pub stop: ChainStop,
}

/// Mutable state of one walk; discarded when the walk returns.
struct ChainState {
    current_url: Url,
    hops_used: usize,
    markers: Markers,
}

impl ChainState {
    fn new(start: &Url) -> Self {
        Self {
            current_url: start.clone(),
            hops_used: 0,
            markers: Markers::default(),
        }
    }

    fn observe_current(&mut self) {
        self.markers.merge(extract_markers(&self.current_url));
    }

    fn advance(&mut self, next: Url) {
        self.current_url = next;
        self.hops_used += 1;
    }

    fn finish(self, stop: ChainStop) -> ChainOutcome {
        ChainOutcome {
            final_url: self.current_url,
            markers: self.markers,
            hops: self.hops_used,
            stop,
        }
    }
}

/// Walks redirect chains with a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct ChainWalker {
    fetcher: Fetcher,
    max_hops: usize,
}

impl ChainWalker {
    pub fn new(fetcher: Fetcher, max_hops: usize) -> Self {
        Self { fetcher, max_hops }
    }

    /// Walks the chain starting at `start`.
    ///
    /// Performs at most `max_hops` fetches. Never fails: every stop condition
    /// is reported through [`ChainOutcome::stop`] along with the best state
    /// known at that point.
    pub async fn walk(&self, start: &Url) -> ChainOutcome {
        let mut state = ChainState::new(start);

        while state.hops_used < self.max_hops {
            state.observe_current();
            if state.markers.is_complete() {
                return state.finish(ChainStop::MarkersFound);
            }

            let page = match self.fetcher.fetch(&state.current_url).await {
                FetchOutcome::Fetched(page) => page,
                FetchOutcome::Failed(failure) => {
                    return state.finish(ChainStop::FetchFailed(failure));
                }
            };

            if page.is_redirect() {
                if let Some(location) = page.location() {
                    match state.current_url.join(location) {
                        Ok(next) if is_web_url(&next) => {
                            debug!(
                                "Hop {}: {} {} -> {}",
                                state.hops_used + 1,
                                page.status,
                                state.current_url,
                                next
                            );
                            state.advance(next);
                            continue;
                        }
                        Ok(next) => {
                            warn!(
                                "Not following non-http Location '{}' from {}",
                                next, state.current_url
                            );
                        }
                        Err(e) => {
                            warn!(
                                "Unresolvable Location '{}' from {}: {}",
                                location, state.current_url, e
                            );
                        }
                    }
                }
                return state.finish(ChainStop::Terminal(page.status));
            }

            if page.status == 200 {
                let sniffed = page
                    .body
                    .as_deref()
                    .and_then(|body| sniff_redirect(body, &state.current_url));
                if let Some(redirect) = sniffed {
                    debug!(
                        "Hop {}: {} {} -> {}",
                        state.hops_used + 1,
                        redirect.heuristic,
                        state.current_url,
                        redirect.target
                    );
                    state.advance(redirect.target);
                    continue;
                }
                return state.finish(ChainStop::NoRedirect);
            }

            return state.finish(ChainStop::Terminal(page.status));
        }

        // The last target was never fetched, but its query is already known
        state.observe_current();
        if state.markers.is_complete() {
            return state.finish(ChainStop::MarkersFound);
        }
        debug!(
            "Hop limit ({}) reached at {}",
            self.max_hops, state.current_url
        );
        state.finish(ChainStop::HopLimit)
    }
}
