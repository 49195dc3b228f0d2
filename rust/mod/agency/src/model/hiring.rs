use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Money;

/// Hiring: a client bought an ad placement at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hiring {
    #[serde(default)]
    pub id: String,

    /// Ad.id
    pub ad_id: String,

    /// Client.id
    pub client_id: String,

    pub contracted_at: DateTime<Utc>,

    pub price: Money,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

impl Hiring {
    /// Price as shown to people: `$1234.50`.
    pub fn formatted_price(&self) -> String {
        self.price.to_string()
    }
}
