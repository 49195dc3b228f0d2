use serde::{Deserialize, Serialize};

use super::DateRange;

/// Appearance: an ad shown on a web page during a time window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    #[serde(default)]
    pub id: String,

    /// Ad.id
    pub ad_id: String,

    /// WebPage.id
    pub web_page_id: String,

    pub period: DateRange,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}
