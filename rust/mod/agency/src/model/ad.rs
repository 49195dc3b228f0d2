use std::fmt;

use serde::{Deserialize, Serialize};

use agency_core::ServiceError;

use super::Money;
use crate::validate;

pub const AD_NAME_MAX_LEN: usize = 100;
pub const AD_TITLE_MAX_LEN: usize = 100;

/// Ad: an advertisement, tied to a type, a category and a campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    #[serde(default)]
    pub id: String,

    pub name: String,

    pub title: String,

    /// Body of the advertisement.
    pub content: String,

    pub price: Money,

    /// AdType.id
    pub type_id: String,

    /// Campaign.id
    pub campaign_id: String,

    /// Category.id
    pub category_id: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

impl Ad {
    pub fn normalize(&mut self) {
        validate::trim(&mut self.name);
        validate::trim(&mut self.title);
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        validate::required("name", &self.name, AD_NAME_MAX_LEN)?;
        validate::required("title", &self.title, AD_TITLE_MAX_LEN)?;
        if self.content.trim().is_empty() {
            return Err(ServiceError::Validation("content is required".into()));
        }
        Ok(())
    }

    /// Price as shown to people: `$1234.50`.
    pub fn formatted_price(&self) -> String {
        self.price.to_string()
    }
}

impl fmt::Display for Ad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.title)
    }
}
