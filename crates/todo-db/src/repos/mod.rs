//! Model implementations and accessors built on [`crate::dao`].

pub mod task;
