//! Restrict-on-delete: which records block the deletion of which.
//!
//! `DEPENDENTS` is the single source of truth. Every delete goes through
//! [`ensure_no_dependents`] inside the same transaction as the DELETE.

use agency_core::ServiceError;
use agency_sql::{SQLExecutor, Value};

/// A relationship whose rows keep a parent record alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependent {
    /// Table holding the foreign key.
    pub table: &'static str,
    /// Foreign-key column pointing at the parent's id.
    pub column: &'static str,
    /// Plural label used in error messages.
    pub label: &'static str,
}

const fn dep(table: &'static str, column: &'static str, label: &'static str) -> Dependent {
    Dependent {
        table,
        column,
        label,
    }
}

/// Parent table → relationships that block its deletion.
pub const DEPENDENTS: &[(&str, &[Dependent])] = &[
    ("topic_pages", &[dep("web_pages", "topic_id", "web pages")]),
    ("categories", &[dep("ads", "category_id", "ads")]),
    ("ad_types", &[dep("ads", "type_id", "ads")]),
    ("campaigns", &[dep("ads", "campaign_id", "ads")]),
    (
        "ads",
        &[
            dep("appearances", "ad_id", "appearances"),
            dep("hirings", "ad_id", "hirings"),
        ],
    ),
    ("web_pages", &[dep("appearances", "web_page_id", "appearances")]),
    ("clients", &[dep("hirings", "client_id", "hirings")]),
];

/// Relationships that block deleting a row of `table`. Leaf tables have none.
pub fn dependents_of(table: &str) -> &'static [Dependent] {
    DEPENDENTS
        .iter()
        .find(|(parent, _)| *parent == table)
        .map(|(_, deps)| *deps)
        .unwrap_or(&[])
}

/// Count the rows of each dependent relationship that reference `id`.
/// Only relationships with at least one row are returned.
pub(crate) fn count_dependents<E: SQLExecutor + ?Sized>(
    db: &E,
    table: &str,
    id: &str,
) -> Result<Vec<(Dependent, i64)>, ServiceError> {
    let mut found = Vec::new();
    for dep in dependents_of(table) {
        let sql = format!(
            "SELECT COUNT(*) AS cnt FROM {} WHERE {} = ?1",
            dep.table, dep.column
        );
        let rows = db
            .query(&sql, &[Value::Text(id.to_string())])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        let cnt = rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0);
        if cnt > 0 {
            found.push((*dep, cnt));
        }
    }
    Ok(found)
}

/// Fail with `Integrity` if any record still references `table/id`.
pub(crate) fn ensure_no_dependents<E: SQLExecutor + ?Sized>(
    db: &E,
    table: &str,
    label: &str,
    id: &str,
) -> Result<(), ServiceError> {
    let found = count_dependents(db, table, id)?;
    if found.is_empty() {
        return Ok(());
    }
    let blocking: Vec<String> = found
        .iter()
        .map(|(dep, cnt)| format!("{} ({})", dep.label, cnt))
        .collect();
    Err(ServiceError::Integrity(format!(
        "cannot delete {} {}: still referenced by {}",
        label,
        id,
        blocking.join(", ")
    )))
}
