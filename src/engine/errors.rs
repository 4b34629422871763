//! Engine error types.

use thiserror::Error;

use crate::sql::CompileError;

/// Errors surfaced by a store operation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No fields to write. Detected at compile time, before any storage
    /// contact.
    #[error("empty payload: no fields to write")]
    EmptyPayload,

    /// No row matched the key.
    #[error("resource not found")]
    NotFound,

    /// The statement did not complete within the configured deadline. Any
    /// open transaction is rolled back.
    #[error("statement timed out")]
    Timeout,

    /// A storage-layer failure, carrying the database's own classification
    /// so constraint violations stay observable.
    #[error("storage failure: {message}")]
    Storage {
        /// SQLSTATE code, when the database reported one.
        code: Option<String>,
        /// Violated constraint name, when the database reported one.
        constraint: Option<String>,
        message: String,
    },
}

impl EngineError {
    pub(crate) fn storage(message: impl Into<String>) -> Self {
        EngineError::Storage {
            code: None,
            constraint: None,
            message: message.into(),
        }
    }
}

impl From<CompileError> for EngineError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::EmptyPayload => EngineError::EmptyPayload,
        }
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => EngineError::Storage {
                code: db.code().map(|c| c.to_string()),
                constraint: db.constraint().map(str::to_string),
                message: db.message().to_string(),
            },
            sqlx::Error::PoolTimedOut => EngineError::Timeout,
            _ => EngineError::storage(err.to_string()),
        }
    }
}
