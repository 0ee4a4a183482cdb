//! Error type definitions.
//!
//! Library errors are `thiserror` enums. Failures that the resolver treats as
//! data (a fetch that timed out, a navigation that never settled) are not
//! errors and live in the outcome types of `fetch` and `browser` instead.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Per-request resolution errors.
///
/// These never abort a batch: the coordinator turns each one into the `error`
/// field of that request's [`ResolutionResult`](crate::ResolutionResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The input could not be parsed as an absolute URL.
    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl {
        /// The raw input string
        input: String,
        /// Parser message
        reason: String,
    },

    /// The input parsed but does not use http or https.
    #[error("Unsupported URL scheme '{scheme}' in '{input}'")]
    UnsupportedScheme {
        /// The raw input string
        input: String,
        /// The rejected scheme
        scheme: String,
    },

    /// The shared browser engine could not be started.
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    /// The engine is running but a page could not be opened or driven.
    #[error("Browser page error: {0}")]
    BrowserPage(String),
}

/// Why a single fetch produced no usable response.
///
/// Mirrors the categories `reqwest` reports. The chain walker treats every
/// variant the same way (stop walking, keep what is known), the distinction
/// only feeds logging and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchFailure {
    /// The request-scoped timeout elapsed.
    Timeout,
    /// TCP/TLS connection could not be established.
    Connect,
    /// The response body could not be read.
    Body,
    /// The request could not be built (e.g. invalid header value).
    Builder,
    /// Any other transport error.
    Other,
}

impl FetchFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchFailure::Timeout => "request timed out",
            FetchFailure::Connect => "connection failed",
            FetchFailure::Body => "failed to read response body",
            FetchFailure::Builder => "failed to build request",
            FetchFailure::Other => "request failed",
        }
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
