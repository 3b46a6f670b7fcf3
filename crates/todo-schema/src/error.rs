//! Registry lookup and validation failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// No schema is registered under this name.
    #[error("unknown schema '{0}'")]
    Unknown(String),

    /// The instance violates the schema; one message per violation, prefixed
    /// with its instance path when it has one.
    #[error("instance does not match schema: {errors:?}")]
    ValidationFailed { errors: Vec<String> },

    /// The derived schema could not be compiled into a validator.
    #[error("schema '{name}' does not compile: {reason}")]
    Uncompiled { name: String, reason: String },
}
