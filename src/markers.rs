//! Campaign marker extraction.
//!
//! A marker is one of the two query parameters (`campaign`, `campaignMarker`)
//! the resolver is looking for along a redirect chain.

use serde::Serialize;
use url::Url;

use crate::config::{CAMPAIGN_MARKER_PARAM, CAMPAIGN_PARAM};

/// The two marker values found on a URL, or accumulated over a chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Markers {
    /// Value of the `campaign` query parameter
    pub campaign: Option<String>,
    /// Value of the `campaignMarker` query parameter
    pub campaign_marker: Option<String>,
}

impl Markers {
    /// True once both markers are known.
    pub fn is_complete(&self) -> bool {
        self.campaign.is_some() && self.campaign_marker.is_some()
    }

    /// Merges markers found on a later hop. For each marker the last non-null
    /// value wins; a hop without a marker never clears an earlier one.
    pub fn merge(&mut self, later: Markers) {
        if later.campaign.is_some() {
            self.campaign = later.campaign;
        }
        if later.campaign_marker.is_some() {
            self.campaign_marker = later.campaign_marker;
        }
    }
}

/// Reads the `campaign` and `campaignMarker` query parameters from `url`.
///
/// Keys are matched exactly (case-sensitive). Values are percent-decoded; when
/// a key repeats, the first occurrence wins. An empty value counts as absent,
/// so `campaign=` never completes a chain.
pub fn extract_markers(url: &Url) -> Markers {
    let mut campaign = None;
    let mut campaign_marker = None;
    for (key, value) in url.query_pairs() {
        if campaign.is_none() && key == CAMPAIGN_PARAM {
            campaign = Some(value);
        } else if campaign_marker.is_none() && key == CAMPAIGN_MARKER_PARAM {
            campaign_marker = Some(value);
        }
        if campaign.is_some() && campaign_marker.is_some() {
            break;
        }
    }
    Markers {
        campaign: non_empty(campaign),
        campaign_marker: non_empty(campaign_marker),
    }
}

fn non_empty(value: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.into_owned())
}
