//! Field-level checks shared by the models' `validate` implementations.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use agency_core::ServiceError;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Non-blank text of at most `max` characters.
pub(crate) fn required(field: &str, value: &str, max: usize) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", field)));
    }
    max_len(field, value, max)
}

/// Text of at most `max` characters; may be empty.
pub(crate) fn max_len(field: &str, value: &str, max: usize) -> Result<(), ServiceError> {
    let len = value.chars().count();
    if len > max {
        return Err(ServiceError::Validation(format!(
            "{} is {} characters long, at most {} allowed",
            field, len, max
        )));
    }
    Ok(())
}

pub(crate) fn optional(field: &str, value: Option<&str>, max: usize) -> Result<(), ServiceError> {
    match value {
        Some(v) => max_len(field, v, max),
        None => Ok(()),
    }
}

/// Trim surrounding whitespace in place.
pub(crate) fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim an optional value; blank becomes `None`.
pub(crate) fn trim_optional(value: &mut Option<String>) {
    if let Some(v) = value {
        trim(v);
        if v.is_empty() {
            *value = None;
        }
    }
}

/// An absolute http(s) URL.
pub(crate) fn http_url(field: &str, value: &str) -> Result<(), ServiceError> {
    let url = Url::parse(value)
        .map_err(|e| ServiceError::Validation(format!("{} is not a valid URL: {}", field, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ServiceError::Validation(format!(
            "{} has unsupported URL scheme: {}",
            field, scheme
        ))),
    }
}

/// Empty or a plausible e-mail address.
pub(crate) fn email(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.is_empty() || EMAIL.is_match(value) {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "{} is not a valid e-mail address",
            field
        )))
    }
}
