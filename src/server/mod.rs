//! HTTP view server.
//!
//! Provides two endpoints:
//! - `GET /` - a form for pasting URLs
//! - `POST /view` - resolves the submitted URLs and renders an HTML table
//!
//! `POST /view` also accepts submissions from a bookmarklet running on
//! another origin, so it takes plain form posts without CSRF tokens. The
//! server binds to loopback only.

mod handlers;
mod render;
mod types;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::app::shutdown_signal;
use crate::browser::SharedBrowser;
use crate::config::MAX_FORM_BODY_SIZE;
use crate::resolve::Resolver;

use handlers::{form_handler, view_handler};
pub use render::{escape_html, short_label};
pub use types::ServerState;

/// Builds the router.
pub fn router(resolver: Arc<Resolver>) -> Router {
    Router::new()
        .route("/", get(form_handler))
        .route("/view", post(view_handler))
        .layer(DefaultBodyLimit::max(MAX_FORM_BODY_SIZE))
        .with_state(ServerState { resolver })
}

/// Serves on `127.0.0.1:port` until SIGINT/SIGTERM, then closes the browser.
pub async fn serve(
    port: u16,
    resolver: Arc<Resolver>,
    browser: Arc<SharedBrowser>,
) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind view server to port {}: {}", port, e))?;

    log::info!("READY http://127.0.0.1:{}/", port);

    let result = axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("View server error: {}", e));

    browser.shutdown().await;
    result
}
