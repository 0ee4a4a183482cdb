//! Batch resolution handler.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use log::info;

use super::super::render::render_results;
use super::super::types::{flag_enabled, ServerState, ViewForm, ViewQuery};
use crate::app::parse_url_list;

/// Resolves the submitted URLs and renders them as an HTML table
pub async fn view_handler(
    State(state): State<ServerState>,
    Query(query): Query<ViewQuery>,
    Form(form): Form<ViewForm>,
) -> Response {
    let use_browser = flag_enabled(query.js.as_deref()) || flag_enabled(form.js.as_deref());
    let urls = form
        .urls
        .as_deref()
        .map(parse_url_list)
        .unwrap_or_default();

    if urls.is_empty() {
        return "no urls".into_response();
    }

    info!(
        "Resolving {} URL(s) from form (browser fallback {})",
        urls.len(),
        if use_browser { "on" } else { "off" }
    );
    let results = state.resolver.resolve_batch(&urls, use_browser).await;
    Html(render_results(&results)).into_response()
}
