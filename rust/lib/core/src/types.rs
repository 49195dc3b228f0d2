use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for list operations.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    /// Maximum number of results to return.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Offset for pagination.
    #[serde(default)]
    pub offset: usize,

    /// Sort column; a leading `-` sorts descending (`-start_at`).
    #[serde(default)]
    pub sort: Option<String>,

    /// Case-insensitive substring matched against the entity's search fields.
    #[serde(default)]
    pub q: Option<String>,
}

fn default_limit() -> usize {
    50
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
            sort: None,
            q: None,
        }
    }
}

impl ListParams {
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    pub fn sorted_by(sort: impl Into<String>) -> Self {
        Self {
            sort: Some(sort.into()),
            ..Default::default()
        }
    }

    /// Split `sort` into `(column, descending)`. Blank values count as unset.
    pub fn sort_spec(&self) -> Option<(&str, bool)> {
        let sort = self.sort.as_deref()?.trim();
        if sort.is_empty() {
            return None;
        }
        match sort.strip_prefix('-') {
            Some(col) => Some((col, true)),
            None => Some((sort, false)),
        }
    }

    /// The search term, if one was given and is not blank.
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Result wrapper for list operations.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T: Serialize> {
    pub items: Vec<T>,
    /// Matching rows before pagination.
    pub total: usize,
}

/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Get the current time as an RFC 3339 string.
///
/// Always UTC with microsecond precision, so stored strings sort in time order.
pub fn now_rfc3339() -> String {
    rfc3339(&Utc::now())
}

/// Format a timestamp the same way `now_rfc3339` does.
pub fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Merge a JSON patch into a base value (RFC 7386).
///
/// `null` removes the key; nested objects merge recursively; anything
/// else replaces the existing value.
pub fn merge_patch(base: &mut serde_json::Value, patch: &serde_json::Value) {
    let (Some(base_obj), Some(patch_obj)) = (base.as_object_mut(), patch.as_object()) else {
        *base = patch.clone();
        return;
    };
    for (key, value) in patch_obj {
        if value.is_null() {
            base_obj.remove(key);
        } else if value.is_object() {
            let entry = base_obj
                .entry(key.clone())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            merge_patch(entry, value);
        } else {
            base_obj.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(!id.contains('-'));
        assert_ne!(id, new_id());
    }

    #[test]
    fn test_rfc3339_is_fixed_width() {
        let a = rfc3339(&"2024-06-01T00:00:00Z".parse().unwrap());
        let b = rfc3339(&"2024-06-01T00:00:00.5Z".parse().unwrap());
        assert_eq!(a, "2024-06-01T00:00:00.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn test_sort_spec() {
        assert_eq!(ListParams::sorted_by("-start_at").sort_spec(), Some(("start_at", true)));
        assert_eq!(ListParams::sorted_by("name").sort_spec(), Some(("name", false)));
        assert_eq!(ListParams::sorted_by("  ").sort_spec(), None);
        assert_eq!(ListParams::default().sort_spec(), None);
    }

    #[test]
    fn test_query_ignores_blank() {
        assert_eq!(ListParams::search("  summer ").query(), Some("summer"));
        assert_eq!(ListParams::search("   ").query(), None);
    }

    #[test]
    fn test_merge_patch() {
        let mut base = serde_json::json!({"a": 1, "b": 2, "c": {"d": 3}});
        let patch = serde_json::json!({"b": null, "c": {"e": 4}, "f": 5});
        merge_patch(&mut base, &patch);
        assert_eq!(
            base,
            serde_json::json!({"a": 1, "c": {"d": 3, "e": 4}, "f": 5})
        );
    }
}
