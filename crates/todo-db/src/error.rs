//! Database and service error types for todo-db.

use thiserror::Error;
use todo_core::errors::CoreError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

/// Errors surfaced by [`crate::service::TaskService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Domain failure: missing task or invalid input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Store failure, propagated unmodified.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ServiceError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(err) if err.is_not_found())
    }
}
