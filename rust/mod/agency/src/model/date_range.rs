use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use agency_core::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("end {end} must be after start {start}")]
    EndNotAfterStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl From<DateRangeError> for ServiceError {
    fn from(e: DateRangeError) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

/// A start instant with an optional, strictly later end.
///
/// Shared by campaigns and ad appearances. The only way to obtain one,
/// including deserialization, goes through [`DateRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: DateTime<Utc>,
    #[serde(default)]
    end: Option<DateTime<Utc>>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DateRangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<Self, DateRangeError> {
        if let Some(end) = end {
            if end <= start {
                return Err(DateRangeError::EndNotAfterStart { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// A range with no end.
    pub fn open(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn end_must_follow_start() {
        let start = ts("2024-06-01T00:00:00Z");
        assert!(DateRange::new(start, None).is_ok());
        assert!(DateRange::new(start, Some(ts("2024-06-02T00:00:00Z"))).is_ok());

        let err = DateRange::new(start, Some(ts("2024-05-01T00:00:00Z"))).unwrap_err();
        assert!(matches!(err, DateRangeError::EndNotAfterStart { .. }));

        // Equal instants are rejected too.
        assert!(DateRange::new(start, Some(start)).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2024-06-01T00:00:00Z","end":"2024-07-01T00:00:00Z"}"#)
                .unwrap();
        assert_eq!(ok.end(), Some(ts("2024-07-01T00:00:00Z")));

        let open: DateRange = serde_json::from_str(r#"{"start":"2024-06-01T00:00:00Z"}"#).unwrap();
        assert_eq!(open, DateRange::open(ts("2024-06-01T00:00:00Z")));

        let bad = serde_json::from_str::<DateRange>(
            r#"{"start":"2024-06-01T00:00:00Z","end":"2024-05-01T00:00:00Z"}"#,
        );
        assert!(bad.is_err());
    }
}
