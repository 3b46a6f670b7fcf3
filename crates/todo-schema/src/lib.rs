//! # todo-schema
//!
//! JSON Schema generation, validation, and the OpenAPI document for the Todo List API.
//!
//! - `SchemaRegistry`: every request/response schema, keyed by a snake_case name
//! - Request-body validation, run by the HTTP layer before deserializing
//! - `openapi::document`: the OpenAPI 3.1 description served at `/openapi.json`
//!
//! Types are defined in `todo-core` with `#[derive(JsonSchema)]`; this crate
//! only assembles and applies their schemas.

pub mod error;
pub mod openapi;
pub mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
