pub mod schema;
pub mod integrity;
mod query;
pub mod catalog;
pub mod campaign;
pub mod ad;
pub mod web_page;
pub mod appearance;
pub mod client;
pub mod hiring;

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use agency_core::{ListParams, ListResult, ServiceConfig, ServiceError, merge_patch, now_rfc3339};
use agency_sql::{Row, SQLError, SQLExecutor, SQLStore, SQLTransaction, SqliteStore, Value};

use crate::record::{Record, Reference};
use query::{Filter, ListQuery};

/// Tuning knobs for [`AgencyService`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgencyConfig {
    /// Upper bound applied to `ListParams::limit`.
    pub max_list_limit: usize,
}

impl Default for AgencyConfig {
    fn default() -> Self {
        Self { max_list_limit: 500 }
    }
}

/// Agency service. Owns the SQL store and provides every repository operation.
pub struct AgencyService {
    pub(crate) sql: Box<dyn SQLStore>,
    pub(crate) config: AgencyConfig,
}

impl AgencyService {
    pub fn new(sql: Box<dyn SQLStore>) -> Result<Self, ServiceError> {
        Self::with_config(sql, AgencyConfig::default())
    }

    pub fn with_config(sql: Box<dyn SQLStore>, config: AgencyConfig) -> Result<Self, ServiceError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Self { sql, config })
    }

    /// Open the SQLite database named by `config`, creating its directory if needed.
    pub fn open(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let path = config.resolve_sqlite_path();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    ServiceError::Storage(format!("create {}: {}", dir.display(), e))
                })?;
            }
        }
        let store = SqliteStore::open(&path).map_err(storage_error)?;
        info!(path = %path.display(), "agency store opened");
        Self::new(Box::new(store))
    }

    /// Load a TOML [`ServiceConfig`] from `path` and open its database.
    pub fn open_file(path: &Path) -> Result<Self, ServiceError> {
        let config = ServiceConfig::load(path)?;
        Self::open(&config)
    }

    pub fn config(&self) -> &AgencyConfig {
        &self.config
    }

    // ── Generic CRUD helpers ──

    /// Normalize, validate, check references and insert a fully built record.
    pub(crate) fn create_record<T: Record>(&self, mut record: T) -> Result<T, ServiceError> {
        record.normalize();
        record.validate()?;

        let tx = self.begin()?;
        check_references(tx.as_ref(), &record.references())?;
        insert_row(tx.as_ref(), &record)?;
        tx.commit().map_err(storage_error)?;

        info!(table = T::TABLE, id = record.id(), "created");
        Ok(record)
    }

    /// Get a record by id.
    pub(crate) fn get_record<T: Record>(&self, id: &str) -> Result<T, ServiceError> {
        load_row(self.sql.as_ref(), id)
    }

    /// Apply a JSON merge-patch to a stored record and write it back.
    ///
    /// The patched document goes through the same deserialization,
    /// normalization and validation as a new record, so invalid ranges or
    /// prices never reach storage.
    pub(crate) fn update_record<T: Record>(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<T, ServiceError> {
        let tx = self.begin()?;
        let current: T = load_row(tx.as_ref(), id)?;
        let mut updated: T = apply_patch(&current, patch)?;
        updated.normalize();
        updated.validate()?;
        check_references(tx.as_ref(), &updated.references())?;
        update_row(tx.as_ref(), &updated)?;
        tx.commit().map_err(storage_error)?;

        debug!(table = T::TABLE, id, "updated");
        Ok(updated)
    }

    /// Delete a record unless something still references it.
    pub(crate) fn delete_record<T: Record>(&self, id: &str) -> Result<(), ServiceError> {
        let tx = self.begin()?;

        let rows = tx
            .query(
                &format!("SELECT id FROM {} WHERE id = ?1", T::TABLE),
                &[Value::Text(id.to_string())],
            )
            .map_err(storage_error)?;
        if rows.is_empty() {
            return Err(not_found::<T>(id));
        }

        integrity::ensure_no_dependents(tx.as_ref(), T::TABLE, T::LABEL, id)
            .inspect_err(|e| warn!(table = T::TABLE, id, error = %e, "delete blocked"))?;

        tx.exec(
            &format!("DELETE FROM {} WHERE id = ?1", T::TABLE),
            &[Value::Text(id.to_string())],
        )
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                ServiceError::Integrity(format!("cannot delete {} {}: still referenced", T::LABEL, id))
            } else {
                storage_error(e)
            }
        })?;
        tx.commit().map_err(storage_error)?;

        info!(table = T::TABLE, id, "deleted");
        Ok(())
    }

    /// List records matching `filters` and `params.q`, ordered and paged.
    pub(crate) fn list_records<T: Record>(
        &self,
        params: &ListParams,
        filters: &[Filter],
    ) -> Result<ListResult<T>, ServiceError> {
        let query = ListQuery::build::<T>(filters, params)?;
        let limit = params.limit.min(self.config.max_list_limit);

        let (count_sql, count_params) = query.count_sql();
        let rows = self
            .sql
            .query(&count_sql, count_params)
            .map_err(storage_error)?;
        let total = rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0) as usize;

        let (page_sql, page_params) = query.page_sql(limit, params.offset);
        let rows = self.sql.query(&page_sql, &page_params).map_err(storage_error)?;
        let items = rows
            .iter()
            .map(record_from_row::<T>)
            .collect::<Result<Vec<T>, _>>()?;

        Ok(ListResult { items, total })
    }

    fn begin(&self) -> Result<Box<dyn SQLTransaction + '_>, ServiceError> {
        self.sql.begin().map_err(storage_error)
    }
}

fn not_found<T: Record>(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("{} {} not found", T::LABEL, id))
}

fn storage_error(e: SQLError) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

/// Map a failed INSERT/UPDATE. Constraints only fire here when the
/// service-level checks did not catch the problem first.
fn write_error<T: Record>(e: SQLError) -> ServiceError {
    if e.is_unique_violation() {
        ServiceError::Conflict(format!("{} with the same name already exists", T::LABEL))
    } else if e.is_foreign_key_violation() {
        ServiceError::Reference(format!("{} points to a missing record", T::LABEL))
    } else if e.is_check_violation() {
        ServiceError::Validation(format!("{} failed a storage check: {}", T::LABEL, e))
    } else {
        storage_error(e)
    }
}

/// Every reference must name an existing row.
fn check_references<E: SQLExecutor + ?Sized>(
    db: &E,
    refs: &[Reference],
) -> Result<(), ServiceError> {
    for r in refs {
        let rows = db
            .query(
                &format!("SELECT id FROM {} WHERE id = ?1", r.table),
                &[Value::Text(r.id.clone())],
            )
            .map_err(storage_error)?;
        if rows.is_empty() {
            return Err(ServiceError::Reference(format!(
                "{} {} does not exist",
                r.label, r.id
            )));
        }
    }
    Ok(())
}

fn record_from_row<T: DeserializeOwned>(row: &Row) -> Result<T, ServiceError> {
    let data = row
        .get_str("data")
        .ok_or_else(|| ServiceError::Internal("missing data column".into()))?;
    serde_json::from_str(data).map_err(|e| ServiceError::Internal(e.to_string()))
}

fn load_row<T: Record, E: SQLExecutor + ?Sized>(db: &E, id: &str) -> Result<T, ServiceError> {
    let rows = db
        .query(
            &format!("SELECT data FROM {} WHERE id = ?1", T::TABLE),
            &[Value::Text(id.to_string())],
        )
        .map_err(storage_error)?;
    let row = rows.first().ok_or_else(|| not_found::<T>(id))?;
    record_from_row(row)
}

fn insert_row<T: Record, E: SQLExecutor + ?Sized>(db: &E, record: &T) -> Result<(), ServiceError> {
    let json = serde_json::to_string(record).map_err(|e| ServiceError::Internal(e.to_string()))?;

    let mut cols = vec!["id", "data"];
    let mut placeholders = vec!["?1".to_string(), "?2".to_string()];
    let mut params = vec![Value::Text(record.id().to_string()), Value::Text(json)];

    for (col, val) in record.columns() {
        cols.push(col);
        params.push(val);
        placeholders.push(format!("?{}", params.len()));
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::TABLE,
        cols.join(", "),
        placeholders.join(", "),
    );
    db.exec(&sql, &params).map_err(write_error::<T>)?;
    Ok(())
}

fn update_row<T: Record, E: SQLExecutor + ?Sized>(db: &E, record: &T) -> Result<(), ServiceError> {
    let json = serde_json::to_string(record).map_err(|e| ServiceError::Internal(e.to_string()))?;

    let mut sets = vec!["data = ?1".to_string()];
    let mut params = vec![Value::Text(json)];

    for (col, val) in record.columns() {
        params.push(val);
        sets.push(format!("{} = ?{}", col, params.len()));
    }

    params.push(Value::Text(record.id().to_string()));
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        T::TABLE,
        sets.join(", "),
        params.len(),
    );

    let affected = db.exec(&sql, &params).map_err(write_error::<T>)?;
    if affected == 0 {
        return Err(not_found::<T>(record.id()));
    }
    Ok(())
}

/// Apply a JSON merge-patch (RFC 7386) to a record.
///
/// `id` and `createdAt` cannot be patched; `updatedAt` is refreshed.
/// A patch that yields an invalid document is a validation error.
pub(crate) fn apply_patch<T: Serialize + DeserializeOwned>(
    current: &T,
    patch: serde_json::Value,
) -> Result<T, ServiceError> {
    let mut json = serde_json::to_value(current).map_err(|e| ServiceError::Internal(e.to_string()))?;

    let mut patch = patch;
    let Some(obj) = patch.as_object_mut() else {
        return Err(ServiceError::Validation("patch must be a JSON object".into()));
    };
    obj.remove("id");
    obj.remove("createdAt");
    obj.insert("updatedAt".into(), serde_json::json!(now_rfc3339()));

    merge_patch(&mut json, &patch);
    serde_json::from_value(json).map_err(|e| ServiceError::Validation(e.to_string()))
}
