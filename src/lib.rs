//! link_redirect library: redirect chain resolution and campaign marker extraction
//!
//! Given a tracking or shortened link, this library follows server-side
//! redirects and client-side (meta refresh / script) redirects hop by hop until
//! the `campaign` and `campaignMarker` query parameters show up in a visited
//! URL, the chain ends, or the hop budget runs out. Links whose last hop is
//! computed by JavaScript can optionally be handed to a headless Chromium.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use link_redirect::initialization::{init_resolver, init_shared_browser};
//! use link_redirect::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     max_hops: 8,
//!     ..Default::default()
//! };
//! let browser = init_shared_browser(&config);
//! let resolver = init_resolver(&config, Arc::clone(&browser))?;
//!
//! let results = resolver
//!     .resolve_batch(&["https://t.example/abc".to_string()], true)
//!     .await;
//! for result in &results {
//!     println!("{} {:?} {:?}", result.final_url, result.campaign, result.campaign_marker);
//! }
//!
//! browser.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. The browser fallback needs a local
//! Chrome or Chromium; set `CHROME_EXECUTABLE` if it is not on the default path.

pub mod app;
pub mod browser;
pub mod config;
mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod markers;
mod models;
pub mod resolve;
mod run;
pub mod server;
pub mod sniff;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{FetchFailure, InitializationError, ResolveError};
pub use markers::{extract_markers, Markers};
pub use models::{ResolutionResult, Source};
pub use resolve::Resolver;
pub use run::{run_batch, run_server, BatchReport};
pub use sniff::{sniff_redirect, Heuristic, SniffedRedirect};
