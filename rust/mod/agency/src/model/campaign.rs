use std::fmt;

use serde::{Deserialize, Serialize};

use agency_core::ServiceError;

use super::{DateRange, NAME_MAX_LEN};
use crate::validate;

/// Campaign: a named, time-bounded marketing initiative grouping ads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(default)]
    pub id: String,

    /// Unique among campaigns.
    pub name: String,

    /// When the campaign runs. An open end means it has not been scheduled to stop.
    pub period: DateRange,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

impl Campaign {
    pub fn normalize(&mut self) {
        validate::trim(&mut self.name);
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        validate::required("name", &self.name, NAME_MAX_LEN)
    }
}

impl fmt::Display for Campaign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
