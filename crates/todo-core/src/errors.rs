//! Cross-cutting error types.
//!
//! Store failures (`DatabaseError`) live in `todo-db`; HTTP mapping lives in
//! `todo-api`. These variants are the ones every layer agrees on.

use thiserror::Error;

/// Domain errors raised before or after a store round trip.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed domain validation before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a missing task.
    #[must_use]
    pub fn task_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Task".to_string(),
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
