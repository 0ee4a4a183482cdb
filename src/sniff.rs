//! Client-side redirect sniffing.
//!
//! Detects redirects that a static fetch cannot follow by itself: meta refresh
//! tags, inline script navigation and `history.pushState` calls, plus a final
//! catch-all that looks for any absolute URL already carrying both markers.
//!
//! This is a best-effort regex heuristic over untrusted, possibly truncated
//! markup, not an HTML parser. Redirects built from computed strings, external
//! scripts or markup split across the body cap are missed; such false negatives
//! are accepted (the browser fallback exists for them). The specific patterns
//! run first so the catch-all only fires when nothing more precise matched.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::app::is_web_url;
use crate::config::{CAMPAIGN_MARKER_PARAM, CAMPAIGN_PARAM};

static META_REFRESH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)http-equiv\s*=\s*["']?refresh["']?[^>]*?url\s*=\s*["']?([^"'>\s]+)"#)
        .expect("meta refresh pattern is valid")
});

static SCRIPT_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)location\.(?:href|replace|assign)\s*(?:=|\()\s*['"]([^'"]+)['"]"#)
        .expect("script location pattern is valid")
});

static PUSH_STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)history\.pushState\([^)]*['"]([^'"]+)['"]\s*\)"#)
        .expect("pushState pattern is valid")
});

static ABSOLUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\s"'<>]+"#).expect("absolute URL pattern is valid")
});

/// One redirect-detection heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// `<meta http-equiv="refresh" content="0;url=...">`
    MetaRefresh,
    /// `location.href = "..."`, `location.replace("...")`, `location.assign("...")`
    ScriptLocation,
    /// `history.pushState(state, title, "...")`
    PushState,
    /// Any absolute http(s) URL whose text holds both `campaign=` and `campaignMarker=`
    BareUrl,
}

impl Heuristic {
    /// Evaluation order; the first heuristic with a match wins.
    pub const PRIORITY: [Heuristic; 4] = [
        Heuristic::MetaRefresh,
        Heuristic::ScriptLocation,
        Heuristic::PushState,
        Heuristic::BareUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Heuristic::MetaRefresh => "meta-refresh",
            Heuristic::ScriptLocation => "script-location",
            Heuristic::PushState => "push-state",
            Heuristic::BareUrl => "bare-url",
        }
    }

    /// Runs this heuristic alone against `html`.
    ///
    /// Targets from the first three heuristics are resolved against `base`.
    /// A literal that cannot be resolved into an http(s) URL counts as no
    /// match, so `javascript:` and `data:` targets are never followed.
    pub fn find(&self, html: &str, base: &Url) -> Option<Url> {
        let literal = match self {
            Heuristic::MetaRefresh => first_capture(&META_REFRESH, html),
            Heuristic::ScriptLocation => first_capture(&SCRIPT_LOCATION, html),
            Heuristic::PushState => first_capture(&PUSH_STATE, html),
            Heuristic::BareUrl => {
                return ABSOLUTE_URL
                    .find_iter(html)
                    .map(|m| decode_amp(m.as_str()))
                    .filter(|candidate| carries_both_markers(candidate))
                    .find_map(|candidate| Url::parse(&candidate).ok());
            }
        }?;
        base.join(&decode_amp(literal))
            .ok()
            .filter(is_web_url)
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A redirect target found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniffedRedirect {
    pub heuristic: Heuristic,
    pub target: Url,
}

/// Looks for a client-side redirect in `html`, trying each [`Heuristic`] in
/// priority order. `None` means no redirect was recognized; it is not an error.
pub fn sniff_redirect(html: &str, base: &Url) -> Option<SniffedRedirect> {
    Heuristic::PRIORITY.iter().find_map(|heuristic| {
        heuristic.find(html, base).map(|target| SniffedRedirect {
            heuristic: *heuristic,
            target,
        })
    })
}

fn first_capture<'h>(pattern: &Regex, html: &'h str) -> Option<&'h str> {
    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// Attribute values and inline text commonly carry `&amp;` between query parameters.
fn decode_amp(raw: &str) -> String {
    raw.replace("&amp;", "&")
}

fn carries_both_markers(candidate: &str) -> bool {
    let query = match candidate.split_once('?') {
        Some((_, query)) => query,
        None => return false,
    };
    query.contains(&format!("{CAMPAIGN_PARAM}="))
        && query.contains(&format!("{CAMPAIGN_MARKER_PARAM}="))
}
