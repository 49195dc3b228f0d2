use std::fmt;

use serde::{Deserialize, Serialize};

use agency_core::ServiceError;

use crate::validate;

pub const WEB_PAGE_NAME_MAX_LEN: usize = 100;

/// WebPage: a page where ads can appear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebPage {
    #[serde(default)]
    pub id: String,

    /// Absolute http(s) URL.
    pub url: String,

    pub name: String,

    /// TopicPage.id
    pub topic_id: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

impl WebPage {
    pub fn normalize(&mut self) {
        validate::trim(&mut self.url);
        validate::trim(&mut self.name);
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        validate::http_url("url", &self.url)?;
        validate::required("name", &self.name, WEB_PAGE_NAME_MAX_LEN)
    }
}

impl fmt::Display for WebPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
