use chrono::{DateTime, Utc};

use agency_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};

use crate::model::{Appearance, DateRange};
use super::AgencyService;
use super::query::Filter;

/// Parameters for placing an ad on a web page.
#[derive(Debug, Clone)]
pub struct CreateAppearanceInput {
    pub ad_id: String,
    pub web_page_id: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

/// Query filters for listing appearances.
#[derive(Debug, Default)]
pub struct AppearanceFilters {
    pub ad_id: Option<String>,
    pub web_page_id: Option<String>,
}

impl AgencyService {
    /// Fails with `Validation` if `end` is not after `start`.
    pub fn create_appearance(&self, input: CreateAppearanceInput) -> Result<Appearance, ServiceError> {
        let period = DateRange::new(input.start, input.end)?;
        let now = now_rfc3339();
        self.create_record(Appearance {
            id: new_id(),
            ad_id: input.ad_id,
            web_page_id: input.web_page_id,
            period,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn get_appearance(&self, id: &str) -> Result<Appearance, ServiceError> {
        self.get_record(id)
    }

    pub fn update_appearance(&self, id: &str, patch: serde_json::Value) -> Result<Appearance, ServiceError> {
        self.update_record(id, patch)
    }

    pub fn delete_appearance(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_record::<Appearance>(id)
    }

    pub fn list_appearances(
        &self,
        params: &ListParams,
        filters: &AppearanceFilters,
    ) -> Result<ListResult<Appearance>, ServiceError> {
        let f: Vec<Filter> = [
            Filter::eq("ad_id", filters.ad_id.as_ref()),
            Filter::eq("web_page_id", filters.web_page_id.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect();
        self.list_records(params, &f)
    }
}

#[cfg(test)]
mod tests {
    use agency_sql::SqliteStore;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::service::ad::CreateAdInput;
    use crate::service::campaign::CreateCampaignInput;
    use crate::service::catalog::CatalogInput;
    use crate::service::web_page::CreateWebPageInput;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    /// A service holding one ad and one web page.
    fn setup() -> (AgencyService, String, String) {
        let svc = AgencyService::new(Box::new(SqliteStore::open_in_memory().unwrap())).unwrap();
        let campaign = svc
            .create_campaign(CreateCampaignInput {
                name: "Summer".into(),
                start: ts("2024-06-01T00:00:00Z"),
                end: None,
            })
            .unwrap();
        let ad = svc
            .create_ad(CreateAdInput {
                name: "Beach".into(),
                title: "Sun is out".into(),
                content: "Visit the coast".into(),
                price: Decimal::new(500, 0),
                type_id: svc.create_ad_type(CatalogInput::new("Banner")).unwrap().id,
                campaign_id: campaign.id,
                category_id: svc.create_category(CatalogInput::new("Travel")).unwrap().id,
            })
            .unwrap();
        let page = svc
            .create_web_page(CreateWebPageInput {
                url: "https://news.example.com".into(),
                name: "Headlines".into(),
                topic_id: svc.create_topic_page(CatalogInput::new("News")).unwrap().id,
            })
            .unwrap();
        (svc, ad.id, page.id)
    }

    fn placement(ad_id: &str, page_id: &str, start: &str, end: Option<&str>) -> CreateAppearanceInput {
        CreateAppearanceInput {
            ad_id: ad_id.into(),
            web_page_id: page_id.into(),
            start: ts(start),
            end: end.map(ts),
        }
    }

    #[test]
    fn period_is_validated() {
        let (svc, ad, page) = setup();
        let err = svc
            .create_appearance(placement(&ad, &page, "2024-06-10T00:00:00Z", Some("2024-06-10T00:00:00Z")))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let a = svc
            .create_appearance(placement(&ad, &page, "2024-06-10T00:00:00Z", Some("2024-06-20T00:00:00Z")))
            .unwrap();
        let err = svc
            .update_appearance(&a.id, json!({"period": {"start": "2024-07-01T00:00:00Z"}}))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn blocks_ad_and_page_deletion() {
        let (svc, ad, page) = setup();
        let a = svc
            .create_appearance(placement(&ad, &page, "2024-06-10T00:00:00Z", None))
            .unwrap();

        assert!(matches!(svc.delete_ad(&ad), Err(ServiceError::Integrity(_))));
        assert!(matches!(svc.delete_web_page(&page), Err(ServiceError::Integrity(_))));

        svc.delete_appearance(&a.id).unwrap();
        svc.delete_web_page(&page).unwrap();
        svc.delete_ad(&ad).unwrap();
    }

    #[test]
    fn latest_first_and_filtered() {
        let (svc, ad, page) = setup();
        let early = svc
            .create_appearance(placement(&ad, &page, "2024-06-01T00:00:00Z", None))
            .unwrap();
        let late = svc
            .create_appearance(placement(&ad, &page, "2024-07-01T00:00:00Z", None))
            .unwrap();

        let filters = AppearanceFilters {
            web_page_id: Some(page.clone()),
            ..Default::default()
        };
        let list = svc.list_appearances(&ListParams::default(), &filters).unwrap();
        let ids: Vec<_> = list.items.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, [late.id.as_str(), early.id.as_str()]);

        let hits = svc
            .list_appearances(&ListParams::search("headlines"), &AppearanceFilters::default())
            .unwrap();
        assert_eq!(hits.total, 2);
    }
}
