use chrono::{DateTime, Utc};

use agency_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};

use crate::model::{Campaign, DateRange};
use super::AgencyService;

/// Parameters for creating a campaign.
#[derive(Debug, Clone)]
pub struct CreateCampaignInput {
    pub name: String,
    pub start: DateTime<Utc>,
    /// `None` leaves the campaign open-ended.
    pub end: Option<DateTime<Utc>>,
}

impl AgencyService {
    /// Fails with `Validation` if `end` is not after `start`.
    pub fn create_campaign(&self, input: CreateCampaignInput) -> Result<Campaign, ServiceError> {
        let period = DateRange::new(input.start, input.end)?;
        let now = now_rfc3339();
        self.create_record(Campaign {
            id: new_id(),
            name: input.name,
            period,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn get_campaign(&self, id: &str) -> Result<Campaign, ServiceError> {
        self.get_record(id)
    }

    /// Merge-patch a campaign. `{"period": {"end": null}}` reopens it.
    pub fn update_campaign(&self, id: &str, patch: serde_json::Value) -> Result<Campaign, ServiceError> {
        self.update_record(id, patch)
    }

    /// Fails with `Integrity` while any ad belongs to the campaign.
    pub fn delete_campaign(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_record::<Campaign>(id)
    }

    pub fn list_campaigns(&self, params: &ListParams) -> Result<ListResult<Campaign>, ServiceError> {
        self.list_records(params, &[])
    }
}
