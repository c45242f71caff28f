//! Common error types for Showbill

use thiserror::Error;

use crate::schedule::ScheduleError;
use crate::validation::ValidationErrors;

/// Common result type for Showbill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Showbill crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored JSON column could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record (or a record it references) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Submitted form data was rejected
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),

    /// Stored data violates an invariant the schema should guarantee
    #[error("Data integrity error: {0}")]
    Integrity(#[from] ScheduleError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse failure category reported to callers of write operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Validation,
    NotFound,
    Storage,
}

impl Error {
    pub fn category(&self) -> FailureCategory {
        match self {
            Error::Validation(_) => FailureCategory::Validation,
            Error::NotFound(_) => FailureCategory::NotFound,
            Error::Database(sqlx::Error::RowNotFound) => FailureCategory::NotFound,
            Error::Database(_)
            | Error::Io(_)
            | Error::Serialization(_)
            | Error::Config(_)
            | Error::Integrity(_)
            | Error::Internal(_) => FailureCategory::Storage,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}
