//! Record implementations for agency models.

use agency_core::{ServiceError, rfc3339};
use agency_sql::Value;

use crate::model::*;
use crate::record::{Record, Reference, SearchField};

fn period_columns(period: &DateRange) -> [(&'static str, Value); 2] {
    [
        ("start_at", Value::Text(rfc3339(&period.start()))),
        ("end_at", period.end().map(|end| rfc3339(&end)).into()),
    ]
}

macro_rules! impl_catalog_record {
    ($ty:ident, $table:expr, $label:expr) => {
        impl Record for $ty {
            const TABLE: &'static str = $table;
            const LABEL: &'static str = $label;
            const SORTABLE: &'static [&'static str] = &["name"];
            const DEFAULT_ORDER: &'static str = "name ASC";
            const SEARCH: &'static [SearchField] = &[SearchField::Column("name")];

            fn id(&self) -> &str {
                &self.id
            }

            fn columns(&self) -> Vec<(&'static str, Value)> {
                vec![
                    ("name", Value::Text(self.name.clone())),
                    ("description", Value::Text(self.description.clone())),
                ]
            }

            fn normalize(&mut self) {
                $ty::normalize(self)
            }

            fn validate(&self) -> Result<(), ServiceError> {
                $ty::validate(self)
            }
        }
    };
}

impl_catalog_record!(TopicPage, "topic_pages", "topic");
impl_catalog_record!(Category, "categories", "category");
impl_catalog_record!(AdType, "ad_types", "ad type");

impl Record for Campaign {
    const TABLE: &'static str = "campaigns";
    const LABEL: &'static str = "campaign";
    const SORTABLE: &'static [&'static str] = &["name", "start_at", "end_at"];
    const DEFAULT_ORDER: &'static str = "name ASC";
    const SEARCH: &'static [SearchField] = &[SearchField::Column("name")];

    fn id(&self) -> &str {
        &self.id
    }

    fn columns(&self) -> Vec<(&'static str, Value)> {
        let mut cols = vec![("name", Value::Text(self.name.clone()))];
        cols.extend(period_columns(&self.period));
        cols
    }

    fn normalize(&mut self) {
        Campaign::normalize(self)
    }

    fn validate(&self) -> Result<(), ServiceError> {
        Campaign::validate(self)
    }
}

impl Record for Ad {
    const TABLE: &'static str = "ads";
    const LABEL: &'static str = "ad";
    const SORTABLE: &'static [&'static str] = &["name", "title"];
    const DEFAULT_ORDER: &'static str = "name ASC";
    const SEARCH: &'static [SearchField] = &[
        SearchField::Column("name"),
        SearchField::Column("title"),
        SearchField::Column("content"),
        SearchField::Related {
            fk: "campaign_id",
            table: "campaigns",
            column: "name",
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn columns(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::Text(self.name.clone())),
            ("title", Value::Text(self.title.clone())),
            ("content", Value::Text(self.content.clone())),
            ("price", Value::Text(self.price.amount().to_string())),
            ("type_id", Value::Text(self.type_id.clone())),
            ("campaign_id", Value::Text(self.campaign_id.clone())),
            ("category_id", Value::Text(self.category_id.clone())),
        ]
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new(AdType::TABLE, AdType::LABEL, &self.type_id),
            Reference::new(Campaign::TABLE, Campaign::LABEL, &self.campaign_id),
            Reference::new(Category::TABLE, Category::LABEL, &self.category_id),
        ]
    }

    fn normalize(&mut self) {
        Ad::normalize(self)
    }

    fn validate(&self) -> Result<(), ServiceError> {
        Ad::validate(self)
    }
}

impl Record for WebPage {
    const TABLE: &'static str = "web_pages";
    const LABEL: &'static str = "web page";
    const SORTABLE: &'static [&'static str] = &["name", "url"];
    const DEFAULT_ORDER: &'static str = "name ASC";
    const SEARCH: &'static [SearchField] = &[SearchField::Column("name"), SearchField::Column("url")];

    fn id(&self) -> &str {
        &self.id
    }

    fn columns(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("url", Value::Text(self.url.clone())),
            ("name", Value::Text(self.name.clone())),
            ("topic_id", Value::Text(self.topic_id.clone())),
        ]
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new(TopicPage::TABLE, TopicPage::LABEL, &self.topic_id)]
    }

    fn normalize(&mut self) {
        WebPage::normalize(self)
    }

    fn validate(&self) -> Result<(), ServiceError> {
        WebPage::validate(self)
    }
}

impl Record for Appearance {
    const TABLE: &'static str = "appearances";
    const LABEL: &'static str = "appearance";
    const SORTABLE: &'static [&'static str] = &["start_at", "end_at"];
    const DEFAULT_ORDER: &'static str = "start_at DESC";
    const SEARCH: &'static [SearchField] = &[
        SearchField::Related {
            fk: "ad_id",
            table: "ads",
            column: "name",
        },
        SearchField::Related {
            fk: "web_page_id",
            table: "web_pages",
            column: "name",
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn columns(&self) -> Vec<(&'static str, Value)> {
        let mut cols = vec![
            ("ad_id", Value::Text(self.ad_id.clone())),
            ("web_page_id", Value::Text(self.web_page_id.clone())),
        ];
        cols.extend(period_columns(&self.period));
        cols
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new(Ad::TABLE, Ad::LABEL, &self.ad_id),
            Reference::new(WebPage::TABLE, WebPage::LABEL, &self.web_page_id),
        ]
    }
}

impl Record for Client {
    const TABLE: &'static str = "clients";
    const LABEL: &'static str = "client";
    const SORTABLE: &'static [&'static str] = &["first_name", "last_name"];
    const DEFAULT_ORDER: &'static str = "last_name ASC, first_name ASC";
    const SEARCH: &'static [SearchField] = &[
        SearchField::Column("first_name"),
        SearchField::Column("last_name"),
        SearchField::Column("email"),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn columns(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("first_name", Value::Text(self.first_name.clone())),
            ("last_name", Value::Text(self.last_name.clone())),
            ("email", self.email.clone().into()),
            ("phone", self.phone.clone().into()),
        ]
    }

    fn normalize(&mut self) {
        Client::normalize(self)
    }

    fn validate(&self) -> Result<(), ServiceError> {
        Client::validate(self)
    }
}

impl Record for Hiring {
    const TABLE: &'static str = "hirings";
    const LABEL: &'static str = "hiring";
    const SORTABLE: &'static [&'static str] = &["contracted_at"];
    const DEFAULT_ORDER: &'static str = "contracted_at DESC";
    const SEARCH: &'static [SearchField] = &[
        SearchField::Related {
            fk: "client_id",
            table: "clients",
            column: "first_name",
        },
        SearchField::Related {
            fk: "client_id",
            table: "clients",
            column: "last_name",
        },
        SearchField::Related {
            fk: "ad_id",
            table: "ads",
            column: "name",
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn columns(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("ad_id", Value::Text(self.ad_id.clone())),
            ("client_id", Value::Text(self.client_id.clone())),
            ("contracted_at", Value::Text(rfc3339(&self.contracted_at))),
            ("price", Value::Text(self.price.amount().to_string())),
        ]
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new(Ad::TABLE, Ad::LABEL, &self.ad_id),
            Reference::new(Client::TABLE, Client::LABEL, &self.client_id),
        ]
    }
}
