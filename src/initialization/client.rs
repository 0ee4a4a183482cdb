//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the shared HTTP client used for chain walking.
///
/// Redirects are disabled so every hop is observed and counted by the chain
/// walker. The whole request (connect, headers and body) is bounded by the
/// configured request timeout.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.request_timeout())
        .connect_timeout(config.request_timeout())
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
