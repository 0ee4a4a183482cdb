//! Main application modules.
//!
//! This module provides utilities for input parsing, URL validation, shutdown
//! handling, and statistics printing used by the binary and the view server.

pub mod input;
pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use input::parse_url_list;
pub use shutdown::{shutdown_gracefully, shutdown_signal};
pub use statistics::{print_batch_statistics, BatchStatistics};
pub use url::{is_web_url, validate_and_normalize_url};
