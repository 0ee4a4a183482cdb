//! Resolution result records.

use serde::Serialize;

use crate::markers::Markers;

/// Which strategy produced a [`ResolutionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// HTTP-only chain walking
    Chain,
    /// Headless browser fallback
    Browser,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Chain => "chain",
            Source::Browser => "browser",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of resolving one input URL.
///
/// Exactly one record is produced per input, even on total failure. Field
/// values come from untrusted pages and are not escaped; consumers rendering
/// them as HTML must escape them first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// Last URL reached; the raw input when nothing could be resolved.
    pub final_url: String,
    pub campaign: Option<String>,
    pub campaign_marker: Option<String>,
    pub source: Source,
    /// Human-readable failure description. May accompany a partial result.
    pub error: Option<String>,
    /// Hops consumed by the chain walk.
    pub hops: usize,
}

impl ResolutionResult {
    pub(crate) fn new(final_url: String, markers: Markers, source: Source, hops: usize) -> Self {
        Self {
            final_url,
            campaign: markers.campaign,
            campaign_marker: markers.campaign_marker,
            source,
            error: None,
            hops,
        }
    }

    /// A result for an input that could not be resolved at all.
    pub(crate) fn failed(input: &str, error: impl std::fmt::Display) -> Self {
        Self {
            final_url: input.to_string(),
            campaign: None,
            campaign_marker: None,
            source: Source::Chain,
            error: Some(error.to_string()),
            hops: 0,
        }
    }

    pub(crate) fn with_error(mut self, error: impl std::fmt::Display) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// True when both markers were found.
    pub fn is_complete(&self) -> bool {
        self.campaign.is_some() && self.campaign_marker.is_some()
    }
}
