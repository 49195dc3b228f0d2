use agency_core::{ListParams, ListResult, ServiceError, new_id, now_rfc3339};

use crate::model::Client;
use super::AgencyService;
use super::query::Filter;

/// Parameters for creating a client.
#[derive(Debug, Clone, Default)]
pub struct CreateClientInput {
    pub first_name: String,
    pub last_name: String,
    pub postal_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Query filters for listing clients. Names match exactly.
#[derive(Debug, Default)]
pub struct ClientFilters {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AgencyService {
    pub fn create_client(&self, input: CreateClientInput) -> Result<Client, ServiceError> {
        let now = now_rfc3339();
        self.create_record(Client {
            id: new_id(),
            first_name: input.first_name,
            last_name: input.last_name,
            postal_address: input.postal_address,
            phone: input.phone,
            email: input.email,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn get_client(&self, id: &str) -> Result<Client, ServiceError> {
        self.get_record(id)
    }

    pub fn update_client(&self, id: &str, patch: serde_json::Value) -> Result<Client, ServiceError> {
        self.update_record(id, patch)
    }

    /// Fails with `Integrity` while the client has hirings.
    pub fn delete_client(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_record::<Client>(id)
    }

    pub fn list_clients(
        &self,
        params: &ListParams,
        filters: &ClientFilters,
    ) -> Result<ListResult<Client>, ServiceError> {
        let f: Vec<Filter> = [
            Filter::eq("first_name", filters.first_name.as_ref()),
            Filter::eq("last_name", filters.last_name.as_ref()),
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
    use serde_json::json;

    use super::*;

    fn service() -> AgencyService {
        AgencyService::new(Box::new(SqliteStore::open_in_memory().unwrap())).unwrap()
    }

    fn client(first: &str, last: &str) -> CreateClientInput {
        CreateClientInput {
            first_name: first.into(),
            last_name: last.into(),
            ..Default::default()
        }
    }

    #[test]
    fn optional_contact_fields() {
        let svc = service();
        let c = svc
            .create_client(CreateClientInput {
                email: Some("ana@example.com".into()),
                phone: Some("  ".into()),
                ..client("Ana", "Lopez")
            })
            .unwrap();
        assert_eq!(c.email.as_deref(), Some("ana@example.com"));
        assert_eq!(c.phone, None);
        assert_eq!(c.to_string(), "Ana Lopez");
        assert_eq!(svc.get_client(&c.id).unwrap(), c);
    }

    #[test]
    fn blank_contact_fields_are_cleared_on_update() {
        let svc = service();
        let c = svc
            .create_client(CreateClientInput {
                email: Some("ana@example.com".into()),
                phone: Some("600 000 000".into()),
                ..client("Ana", "Lopez")
            })
            .unwrap();

        let updated = svc
            .update_client(&c.id, json!({"email": "", "phone": "   ", "lastName": " Diaz "}))
            .unwrap();
        assert_eq!(updated.email, None);
        assert_eq!(updated.phone, None);
        assert_eq!(updated.last_name, "Diaz");
        assert_eq!(svc.get_client(&c.id).unwrap(), updated);

        // The blank value never reaches the searchable email column.
        let hits = svc
            .list_clients(&ListParams::search("example.com"), &ClientFilters::default())
            .unwrap();
        assert_eq!(hits.total, 0);
    }

    #[test]
    fn email_is_validated() {
        let svc = service();
        let err = svc
            .create_client(CreateClientInput {
                email: Some("not-an-email".into()),
                ..client("Ana", "Lopez")
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let c = svc.create_client(client("Ana", "Lopez")).unwrap();
        let err = svc.update_client(&c.id, json!({"email": "ana@"})).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let updated = svc
            .update_client(&c.id, json!({"email": "ana@example.com"}))
            .unwrap();
        assert_eq!(updated.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn names_may_repeat() {
        let svc = service();
        svc.create_client(client("Ana", "Lopez")).unwrap();
        svc.create_client(client("Ana", "Lopez")).unwrap();
    }

    #[test]
    fn ordered_by_last_then_first_name() {
        let svc = service();
        svc.create_client(client("Zoe", "Adams")).unwrap();
        svc.create_client(client("Bob", "Brown")).unwrap();
        svc.create_client(client("Amy", "Brown")).unwrap();

        let list = svc
            .list_clients(&ListParams::default(), &ClientFilters::default())
            .unwrap();
        let names: Vec<String> = list.items.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, ["Zoe Adams", "Amy Brown", "Bob Brown"]);

        let filters = ClientFilters {
            last_name: Some("Brown".into()),
            ..Default::default()
        };
        let list = svc.list_clients(&ListParams::default(), &filters).unwrap();
        assert_eq!(list.total, 2);

        let list = svc
            .list_clients(&ListParams::search("zo"), &ClientFilters::default())
            .unwrap();
        assert_eq!(list.items[0].first_name, "Zoe");
    }
}
