//! HTTP fetching and redirect chain walking.
//!
//! This module provides:
//! - The bounded fetcher: one non-following GET with a hard timeout and a capped body
//! - The chain walker that follows HTTP and sniffed client-side redirects hop by hop

mod redirects;
mod request;
mod response;


use std::sync::Arc;

use log::debug;
use url::Url;

use crate::error_handling::{categorize_reqwest_error, FetchFailure};

use request::RequestHeaders;
use response::read_body_capped;

pub use redirects::{ChainOutcome, ChainStop, ChainWalker};
pub use response::FetchedPage;

/// The result of a single fetch.
///
/// Failure is data here: the chain walker stops on it and keeps what it
/// already knows, it never aborts the request or the batch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// A response arrived (any status).
    Fetched(FetchedPage),
    /// Network failure, timeout or abort.
    Failed(FetchFailure),
}

/// Performs single, non-following GET requests.
///
/// The wrapped client must have redirects disabled and a request timeout set
/// (see [`init_redirect_client`](crate::initialization::init_redirect_client)).
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Arc<reqwest::Client>,
    sniff_limit: usize,
}

impl Fetcher {
    pub fn new(client: Arc<reqwest::Client>, sniff_limit: usize) -> Self {
        Self {
            client,
            sniff_limit,
        }
    }

    /// Fetches `url` once.
    ///
    /// The body is read (up to the sniff limit) only for `200 OK`, the one
    /// status the chain walker sniffs.
    pub async fn fetch(&self, url: &Url) -> FetchOutcome {
        let response = match RequestHeaders::apply_to_request_builder(self.client.get(url.as_str()))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let failure = categorize_reqwest_error(&e);
                debug!("Fetch of {} failed ({}): {}", url, failure, e);
                return FetchOutcome::Failed(failure);
            }
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = if status == 200 {
            match read_body_capped(response, self.sniff_limit).await {
                Ok(body) => Some(body),
                Err(e) => {
                    let failure = categorize_reqwest_error(&e);
                    debug!("Reading body of {} failed ({}): {}", url, failure, e);
                    return FetchOutcome::Failed(failure);
                }
            }
        } else {
            None
        };

        FetchOutcome::Fetched(FetchedPage {
            status,
            headers,
            body,
        })
    }
}
