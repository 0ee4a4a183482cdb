//! Error categorization.

use super::types::FetchFailure;

/// Categorizes a `reqwest::Error` into a [`FetchFailure`].
///
/// Status errors cannot occur here because the fetcher never calls
/// `error_for_status`; a 4xx/5xx response is a valid (terminal) hop.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Connect
    } else if error.is_body() || error.is_decode() {
        FetchFailure::Body
    } else if error.is_builder() {
        FetchFailure::Builder
    } else {
        FetchFailure::Other
    }
}
