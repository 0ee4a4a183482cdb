//! Server state and request payloads.

use std::sync::Arc;

use serde::Deserialize;

use crate::resolve::Resolver;

/// Shared state for the view server
#[derive(Clone)]
pub struct ServerState {
    pub resolver: Arc<Resolver>,
}

/// Form body of `POST /view`.
#[derive(Debug, Default, Deserialize)]
pub struct ViewForm {
    /// Newline-delimited URL list
    pub urls: Option<String>,
    pub js: Option<String>,
}

/// Query string of `POST /view`.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub js: Option<String>,
}

/// True for the truthy spellings HTML forms and bookmarklets send.
pub fn flag_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(str::trim),
        Some("1") | Some("true") | Some("on") | Some("yes")
    )
}
