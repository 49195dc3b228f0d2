use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use agency_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};
use agency_sql::Value;

use crate::model::{Hiring, Money};
use super::AgencyService;
use super::query::Filter;

/// Parameters for recording a hiring.
#[derive(Debug, Clone)]
pub struct CreateHiringInput {
    pub ad_id: String,
    pub client_id: String,
    pub contracted_at: DateTime<Utc>,
    pub price: Decimal,
}

/// Query filters for listing hirings.
#[derive(Debug, Default)]
pub struct HiringFilters {
    pub client_id: Option<String>,
    pub ad_id: Option<String>,
    /// Hirings of any ad in the campaign.
    pub campaign_id: Option<String>,
}

impl AgencyService {
    /// The ad and client must exist; the price must not be negative.
    pub fn create_hiring(&self, input: CreateHiringInput) -> Result<Hiring, ServiceError> {
        let price = Money::new(input.price)?;
        let now = now_rfc3339();
        self.create_record(Hiring {
            id: new_id(),
            ad_id: input.ad_id,
            client_id: input.client_id,
            contracted_at: input.contracted_at,
            price,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn get_hiring(&self, id: &str) -> Result<Hiring, ServiceError> {
        self.get_record(id)
    }

    pub fn update_hiring(&self, id: &str, patch: serde_json::Value) -> Result<Hiring, ServiceError> {
        self.update_record(id, patch)
    }

    pub fn delete_hiring(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_record::<Hiring>(id)
    }

    pub fn list_hirings(
        &self,
        params: &ListParams,
        filters: &HiringFilters,
    ) -> Result<ListResult<Hiring>, ServiceError> {
        let mut f: Vec<Filter> = [
            Filter::eq("client_id", filters.client_id.as_ref()),
            Filter::eq("ad_id", filters.ad_id.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if let Some(campaign_id) = &filters.campaign_id {
            f.push(Filter::Via {
                fk: "ad_id",
                table: "ads",
                column: "campaign_id",
                value: Value::Text(campaign_id.clone()),
            });
        }
        self.list_records(params, &f)
    }
}
