//! HTML rendering for the view endpoint.
//!
//! Every value shown here comes from untrusted pages, so all of it goes
//! through [`escape_html`].

use url::Url;

use crate::app::is_web_url;
use crate::models::ResolutionResult;

const ABSENT: &str = "—";

/// Escapes `& < > " '` for use in element text and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Compact link label: the host, plus `/…` when there is a path beyond `/`.
/// Unparseable values are shown as-is.
pub fn short_label(value: &str) -> String {
    match Url::parse(value) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default();
            if url.path().is_empty() || url.path() == "/" {
                host.to_string()
            } else {
                format!("{host}/…")
            }
        }
        Err(_) => value.to_string(),
    }
}

/// Only http(s) destinations become links; anything else is shown as text.
fn url_cell(final_url: &str) -> String {
    match Url::parse(final_url) {
        Ok(url) if is_web_url(&url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            escape_html(final_url),
            escape_html(&short_label(final_url))
        ),
        _ => escape_html(final_url),
    }
}

fn render_row(index: usize, result: &ResolutionResult) -> String {
    if let Some(error) = &result.error {
        return format!(
            r#"<tr><td>{}</td><td colspan="4" style="color:red">{}</td></tr>"#,
            index + 1,
            escape_html(error)
        );
    }
    format!(
        r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
        index + 1,
        url_cell(&result.final_url),
        escape_html(result.campaign.as_deref().unwrap_or(ABSENT)),
        escape_html(result.campaign_marker.as_deref().unwrap_or(ABSENT)),
        result.source.as_str()
    )
}

/// Renders the results page.
pub fn render_results(results: &[ResolutionResult]) -> String {
    let rows: String = results
        .iter()
        .enumerate()
        .map(|(index, result)| render_row(index, result))
        .collect();

    format!(
        r#"<!doctype html><meta charset="utf-8">
<style>td,th{{padding:4px;border-bottom:1px solid #ccc}}</style><title>link_redirect</title>
<table><thead><tr><th>#</th><th>URL</th><th>campaign</th><th>campaignMarker</th><th>src</th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}

/// The input form served at `/`.
pub fn render_form() -> &'static str {
    r#"<!doctype html><meta charset="utf-8"><title>link_redirect</title>
<form method="post" action="/view">
<textarea name="urls" rows="12" cols="100" placeholder="one URL per line"></textarea><br>
<label><input type="checkbox" name="js" value="1"> use browser fallback</label>
<button type="submit">Resolve</button>
</form>"#
}
