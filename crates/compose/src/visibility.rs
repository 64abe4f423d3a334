use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::section::Section;

/// Optional date window gating whether a section renders "now".
///
/// `devices` is declared in the data model but not enforced during
/// composition: device targeting needs request-time user-agent or viewport
/// signals that are not available in every rendering context. It round-trips
/// through persistence untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisibilityWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<String>,
}

/// Whether a section is visible at `now`.
///
/// No window means always visible. A window whose start is after its end is
/// not rejected anywhere; these rules make such a section never visible.
pub fn is_visible(section: &Section, now: DateTime<Utc>) -> bool {
    let Some(window) = &section.visibility else {
        return true;
    };
    if let Some(start) = window.start_date {
        if now < start {
            return false;
        }
    }
    if let Some(end) = window.end_date {
        if now > end {
            return false;
        }
    }
    true
}
