use agency_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};

use crate::model::WebPage;
use super::AgencyService;
use super::query::Filter;

/// Parameters for creating a web page.
#[derive(Debug, Clone)]
pub struct CreateWebPageInput {
    pub url: String,
    pub name: String,
    pub topic_id: String,
}

/// Query filters for listing web pages.
#[derive(Debug, Default)]
pub struct WebPageFilters {
    pub topic_id: Option<String>,
}

impl AgencyService {
    pub fn create_web_page(&self, input: CreateWebPageInput) -> Result<WebPage, ServiceError> {
        let now = now_rfc3339();
        self.create_record(WebPage {
            id: new_id(),
            url: input.url,
            name: input.name,
            topic_id: input.topic_id,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn get_web_page(&self, id: &str) -> Result<WebPage, ServiceError> {
        self.get_record(id)
    }

    pub fn update_web_page(&self, id: &str, patch: serde_json::Value) -> Result<WebPage, ServiceError> {
        self.update_record(id, patch)
    }

    /// Fails with `Integrity` while any appearance is on the page.
    pub fn delete_web_page(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_record::<WebPage>(id)
    }

    pub fn list_web_pages(
        &self,
        params: &ListParams,
        filters: &WebPageFilters,
    ) -> Result<ListResult<WebPage>, ServiceError> {
        let f: Vec<Filter> = Filter::eq("topic_id", filters.topic_id.as_ref())
            .into_iter()
            .collect();
        self.list_records(params, &f)
    }
}
