//! # todo-core
//!
//! Core types shared across the Todo List API crates.
//!
//! - The `Task` entity and its derived completion percentage
//! - Request shapes (create, update, list query) with domain validation
//! - Response shapes returned by the HTTP layer
//! - Column identifiers used to build store predicates
//! - Cross-cutting error types
//!
//! All request and response types derive `JsonSchema`; `todo-schema` builds the
//! registry and the OpenAPI document from them.

pub mod columns;
pub mod entities;
pub mod errors;
pub mod requests;
pub mod responses;
