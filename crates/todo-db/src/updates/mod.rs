//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields become SET clauses in a partial update; a full update fills the rest
//! with the declared defaults.

pub mod task;
