//! Configuration constants.
//!
//! This module defines the defaults used throughout the resolver: hop limits,
//! timeouts, body caps and the browser observation window. Every value here can
//! be overridden through [`Config`](super::Config).

// Chain walking
/// Maximum number of hops (HTTP redirects plus sniffed client-side redirects)
/// followed for a single input URL.
/// Cycles are not detected; a looping chain simply burns this budget.
pub const MAX_HOPS: usize = 12;

/// Per-request timeout in milliseconds.
/// Applies to each individual fetch and to browser navigation.
pub const REQUEST_TIMEOUT_MS: u64 = 12_000;

/// Maximum number of body bytes kept for redirect sniffing (128 KiB).
/// Anything beyond this is never read off the wire.
pub const HTML_SNIFF_LIMIT: usize = 128 * 1024;

// Browser fallback
/// How long the browser keeps watching the page location after load settles.
pub const BROWSER_OBSERVE_WINDOW_MS: u64 = 4_000;
/// Delay between two location reads during the observation window.
pub const BROWSER_POLL_INTERVAL_MS: u64 = 300;

/// Default User-Agent string, shared by the HTTP fetcher and the browser page.
///
/// Can be overridden via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Input handling
/// Resolutions processed at once within a batch. 1 keeps strictly sequential processing.
pub const DEFAULT_CONCURRENCY: usize = 1;

// HTTP view endpoint
/// Default port for `--serve`.
pub const DEFAULT_SERVER_PORT: u16 = 3030;
/// Maximum accepted form body for `POST /view` (6 MB).
pub const MAX_FORM_BODY_SIZE: usize = 6 * 1024 * 1024;

// Marker query parameter names (exact, case-sensitive)
pub const CAMPAIGN_PARAM: &str = "campaign";
pub const CAMPAIGN_MARKER_PARAM: &str = "campaignMarker";
