//! Input form handler.

use axum::response::Html;

use super::super::render::render_form;

/// Serves the URL input form
pub async fn form_handler() -> Html<&'static str> {
    Html(render_form())
}
