//! SQL for list operations: filters, `q` search, ordering and paging.

use agency_core::{ListParams, ServiceError};
use agency_sql::Value;

use crate::record::{Record, SearchField};

/// A typed list filter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Filter {
    /// `column = value` on the listed table.
    Eq(&'static str, Value),
    /// `fk` points at a row of `table` whose `column` equals the value.
    Via {
        fk: &'static str,
        table: &'static str,
        column: &'static str,
        value: Value,
    },
}

impl Filter {
    pub(crate) fn eq(column: &'static str, value: Option<&String>) -> Option<Self> {
        value.map(|v| Filter::Eq(column, Value::Text(v.clone())))
    }
}

/// WHERE and ORDER BY clauses for one list call, with their parameters.
#[derive(Debug)]
pub(crate) struct ListQuery {
    table: &'static str,
    where_sql: String,
    order_sql: String,
    params: Vec<Value>,
}

impl ListQuery {
    pub(crate) fn build<T: Record>(
        filters: &[Filter],
        params: &ListParams,
    ) -> Result<Self, ServiceError> {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        for filter in filters {
            let idx = values.len() + 1;
            match filter {
                Filter::Eq(col, value) => {
                    clauses.push(format!("{} = ?{}", col, idx));
                    values.push(value.clone());
                }
                Filter::Via {
                    fk,
                    table,
                    column,
                    value,
                } => {
                    clauses.push(format!(
                        "{} IN (SELECT id FROM {} WHERE {} = ?{})",
                        fk, table, column, idx
                    ));
                    values.push(value.clone());
                }
            }
        }

        if let Some(q) = params.query() {
            if !T::SEARCH.is_empty() {
                let idx = values.len() + 1;
                let fields: Vec<String> = T::SEARCH
                    .iter()
                    .map(|field| match field {
                        SearchField::Column(col) => {
                            format!("{} LIKE ?{} ESCAPE '\\'", col, idx)
                        }
                        SearchField::Related { fk, table, column } => format!(
                            "{} IN (SELECT id FROM {} WHERE {} LIKE ?{} ESCAPE '\\')",
                            fk, table, column, idx
                        ),
                    })
                    .collect();
                clauses.push(format!("({})", fields.join(" OR ")));
                values.push(Value::Text(like_pattern(q)));
            }
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        Ok(Self {
            table: T::TABLE,
            where_sql,
            order_sql: order_by::<T>(params)?,
            params: values,
        })
    }

    pub(crate) fn count_sql(&self) -> (String, &[Value]) {
        (
            format!("SELECT COUNT(*) AS cnt FROM {}{}", self.table, self.where_sql),
            &self.params,
        )
    }

    pub(crate) fn page_sql(&self, limit: usize, offset: usize) -> (String, Vec<Value>) {
        let mut params = self.params.clone();
        let limit_idx = params.len() + 1;
        let offset_idx = params.len() + 2;
        params.push(Value::Integer(limit as i64));
        params.push(Value::Integer(offset as i64));
        (
            format!(
                "SELECT data FROM {}{} ORDER BY {} LIMIT ?{} OFFSET ?{}",
                self.table, self.where_sql, self.order_sql, limit_idx, offset_idx
            ),
            params,
        )
    }
}

/// ORDER BY for the requested sort, always ending in `id` so pages are stable.
fn order_by<T: Record>(params: &ListParams) -> Result<String, ServiceError> {
    let Some((col, desc)) = params.sort_spec() else {
        return Ok(format!("{}, id ASC", T::DEFAULT_ORDER));
    };
    if !T::SORTABLE.contains(&col) {
        return Err(ServiceError::Validation(format!(
            "cannot sort {} by {}; sortable: {}",
            T::LABEL,
            col,
            T::SORTABLE.join(", ")
        )));
    }
    Ok(format!("{} {}, id ASC", col, if desc { "DESC" } else { "ASC" }))
}

/// `%q%` with LIKE wildcards in `q` matched literally.
fn like_pattern(q: &str) -> String {
    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
