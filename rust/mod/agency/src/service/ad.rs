use rust_decimal::Decimal;

use agency_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};

use crate::model::{Ad, Money};
use super::AgencyService;
use super::query::Filter;

/// Parameters for creating an ad.
#[derive(Debug, Clone)]
pub struct CreateAdInput {
    pub name: String,
    pub title: String,
    pub content: String,
    pub price: Decimal,
    pub type_id: String,
    pub campaign_id: String,
    pub category_id: String,
}

/// Query filters for listing ads.
#[derive(Debug, Default)]
pub struct AdFilters {
    pub type_id: Option<String>,
    pub category_id: Option<String>,
    pub campaign_id: Option<String>,
}

impl AgencyService {
    /// The type, campaign and category must exist (`Reference` otherwise).
    pub fn create_ad(&self, input: CreateAdInput) -> Result<Ad, ServiceError> {
        let price = Money::new(input.price)?;
        let now = now_rfc3339();
        self.create_record(Ad {
            id: new_id(),
            name: input.name,
            title: input.title,
            content: input.content,
            price,
            type_id: input.type_id,
            campaign_id: input.campaign_id,
            category_id: input.category_id,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn get_ad(&self, id: &str) -> Result<Ad, ServiceError> {
        self.get_record(id)
    }

    pub fn update_ad(&self, id: &str, patch: serde_json::Value) -> Result<Ad, ServiceError> {
        self.update_record(id, patch)
    }

    /// Fails with `Integrity` while the ad has appearances or hirings.
    pub fn delete_ad(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_record::<Ad>(id)
    }

    pub fn list_ads(
        &self,
        params: &ListParams,
        filters: &AdFilters,
    ) -> Result<ListResult<Ad>, ServiceError> {
        let f: Vec<Filter> = [
            Filter::eq("type_id", filters.type_id.as_ref()),
            Filter::eq("category_id", filters.category_id.as_ref()),
            Filter::eq("campaign_id", filters.campaign_id.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect();
        self.list_records(params, &f)
    }
}
