//! The `Record` trait: how a model maps onto its table.
//!
//! Each table stores the full record as JSON in `data`, plus the columns
//! returned by [`Record::columns`] for uniqueness, foreign keys, ordering
//! and search. CRUD is provided generically by `AgencyService`.

use serde::Serialize;
use serde::de::DeserializeOwned;

use agency_core::ServiceError;
use agency_sql::Value;

/// A foreign key held by a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Table the key points into.
    pub table: &'static str,
    /// Human-readable name of the referenced entity, for error messages.
    pub label: &'static str,
    pub id: String,
}

impl Reference {
    pub fn new(table: &'static str, label: &'static str, id: &str) -> Self {
        Self {
            table,
            label,
            id: id.to_string(),
        }
    }
}

/// A field matched by the `q` search of a list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// A column of the record's own table.
    Column(&'static str),
    /// A column of the record a foreign key points to.
    Related {
        fk: &'static str,
        table: &'static str,
        column: &'static str,
    },
}

/// Trait implemented by models persisted in the agency database.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Table name in SQL.
    const TABLE: &'static str;

    /// Singular human-readable name ("web page").
    const LABEL: &'static str;

    /// Columns accepted as `ListParams::sort`.
    const SORTABLE: &'static [&'static str];

    /// ORDER BY clause used when no sort is requested.
    const DEFAULT_ORDER: &'static str;

    /// Fields matched by `ListParams::q`.
    const SEARCH: &'static [SearchField] = &[];

    fn id(&self) -> &str;

    /// Extracted column values, excluding `id` and `data`.
    fn columns(&self) -> Vec<(&'static str, Value)>;

    /// Foreign keys that must point to existing records.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Canonicalize user-entered text. Runs before `validate` on every
    /// insert and update.
    fn normalize(&mut self) {}

    /// Field-level checks run before every insert and update.
    fn validate(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}
