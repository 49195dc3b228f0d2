use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    #[error("query error: {0}")]
    Query(String),

    #[error("execution error: {0}")]
    Execution(String),

    /// A UNIQUE, FOREIGN KEY, CHECK or NOT NULL constraint rejected the statement.
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("transaction error: {0}")]
    Transaction(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl SQLError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, SQLError::Constraint(msg) if msg.contains("UNIQUE constraint"))
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, SQLError::Constraint(msg) if msg.contains("FOREIGN KEY constraint"))
    }

    pub fn is_check_violation(&self) -> bool {
        matches!(self, SQLError::Constraint(msg) if msg.contains("CHECK constraint"))
    }
}
