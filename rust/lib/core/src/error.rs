use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Callers match on these,
// never on the human-readable message string.

/// Stable error code constants.
///
/// A presentation layer should surface `{"code": "HAS_DEPENDENTS", "message": "..."}`.
/// Codes never change; messages may be reworded.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const HAS_DEPENDENTS: &str = "HAS_DEPENDENTS";
    pub const INVALID_REFERENCE: &str = "INVALID_REFERENCE";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type returned by every repository operation.
///
/// All variants describe caller input problems except `Storage` and
/// `Internal`. None of them are retried.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Unknown id.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation, e.g. a second campaign with the same name.
    #[error("{0}")]
    Conflict(String),

    /// A field value is invalid: date range, negative price, blank name...
    #[error("{0}")]
    Validation(String),

    /// Delete rejected because dependent records still reference the target.
    #[error("{0}")]
    Integrity(String),

    /// A foreign key points to a record that does not exist.
    #[error("{0}")]
    Reference(String),

    /// Storage backend failure.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Integrity(_) => error_code::HAS_DEPENDENTS,
            ServiceError::Reference(_) => error_code::INVALID_REFERENCE,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// Whether the error was caused by caller input rather than the backend.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ServiceError::Storage(_) | ServiceError::Internal(_))
    }
}
