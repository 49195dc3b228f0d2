use agency_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};

use crate::model::{AdType, Category, TopicPage};
use super::AgencyService;

/// Parameters for creating a topic, category or ad type.
#[derive(Debug, Clone, Default)]
pub struct CatalogInput {
    pub name: String,
    pub description: Option<String>,
}

impl CatalogInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

macro_rules! catalog_ops {
    ($ty:ident, $create:ident, $get:ident, $update:ident, $delete:ident, $list:ident) => {
        impl AgencyService {
            pub fn $create(&self, input: CatalogInput) -> Result<$ty, ServiceError> {
                let now = now_rfc3339();
                self.create_record($ty {
                    id: new_id(),
                    name: input.name,
                    description: input.description.unwrap_or_default(),
                    created_at: now.clone(),
                    updated_at: now,
                })
            }

            pub fn $get(&self, id: &str) -> Result<$ty, ServiceError> {
                self.get_record(id)
            }

            pub fn $update(&self, id: &str, patch: serde_json::Value) -> Result<$ty, ServiceError> {
                self.update_record(id, patch)
            }

            /// Fails with `Integrity` while anything still points to the entry.
            pub fn $delete(&self, id: &str) -> Result<(), ServiceError> {
                self.delete_record::<$ty>(id)
            }

            pub fn $list(&self, params: &ListParams) -> Result<ListResult<$ty>, ServiceError> {
                self.list_records(params, &[])
            }
        }
    };
}

catalog_ops!(
    TopicPage,
    create_topic_page,
    get_topic_page,
    update_topic_page,
    delete_topic_page,
    list_topic_pages
);

catalog_ops!(
    Category,
    create_category,
    get_category,
    update_category,
    delete_category,
    list_categories
);

catalog_ops!(
    AdType,
    create_ad_type,
    get_ad_type,
    update_ad_type,
    delete_ad_type,
    list_ad_types
);

#[cfg(test)]
mod tests {
    use agency_sql::SqliteStore;
    use serde_json::json;

    use super::*;

    fn service() -> AgencyService {
        AgencyService::new(Box::new(SqliteStore::open_in_memory().unwrap())).unwrap()
    }

    #[test]
    fn create_and_get() {
        let svc = service();
        let topic = svc
            .create_topic_page(CatalogInput::new("Sports").with_description("Games and scores"))
            .unwrap();
        assert_eq!(topic.id.len(), 32);
        assert_eq!(topic.created_at, topic.updated_at);

        let got = svc.get_topic_page(&topic.id).unwrap();
        assert_eq!(got, topic);
    }

    #[test]
    fn names_are_unique_per_type() {
        let svc = service();
        svc.create_category(CatalogInput::new("Travel")).unwrap();
        let err = svc.create_category(CatalogInput::new("Travel")).unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_EXISTS");

        // Same name in a different catalog is fine.
        svc.create_ad_type(CatalogInput::new("Travel")).unwrap();
    }

    #[test]
    fn name_is_trimmed_and_required() {
        let svc = service();
        let t = svc.create_ad_type(CatalogInput::new("  Banner ")).unwrap();
        assert_eq!(t.name, "Banner");

        let err = svc.create_ad_type(CatalogInput::new("   ")).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn update_trims_name_before_uniqueness_check() {
        let svc = service();
        svc.create_category(CatalogInput::new("Travel")).unwrap();
        let food = svc.create_category(CatalogInput::new("Food")).unwrap();

        let err = svc
            .update_category(&food.id, json!({"name": "Travel "}))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(svc.get_category(&food.id).unwrap().name, "Food");

        let renamed = svc
            .update_category(&food.id, json!({"name": "  Snacks "}))
            .unwrap();
        assert_eq!(renamed.name, "Snacks");
        assert_eq!(svc.get_category(&food.id).unwrap().name, "Snacks");
    }

    #[test]
    fn update_description() {
        let svc = service();
        let cat = svc.create_category(CatalogInput::new("Food")).unwrap();
        let updated = svc
            .update_category(&cat.id, json!({"description": "Restaurants"}))
            .unwrap();
        assert_eq!(updated.description, "Restaurants");
        assert_eq!(updated.name, "Food");
        assert_eq!(svc.get_category(&cat.id).unwrap(), updated);
    }

    #[test]
    fn list_in_name_order() {
        let svc = service();
        for name in ["Video", "Banner", "Popup"] {
            svc.create_ad_type(CatalogInput::new(name)).unwrap();
        }
        let page = svc.list_ad_types(&ListParams::default()).unwrap();
        let names: Vec<_> = page.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Banner", "Popup", "Video"]);

        let page = svc.list_ad_types(&ListParams::search("pop")).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Popup");

        let page = svc.list_ad_types(&ListParams::sorted_by("-name")).unwrap();
        assert_eq!(page.items[0].name, "Video");
    }

    #[test]
    fn unused_entry_can_be_deleted() {
        let svc = service();
        let topic = svc.create_topic_page(CatalogInput::new("News")).unwrap();
        svc.delete_topic_page(&topic.id).unwrap();
        assert!(matches!(
            svc.get_topic_page(&topic.id),
            Err(ServiceError::NotFound(_))
        ));
    }
}
