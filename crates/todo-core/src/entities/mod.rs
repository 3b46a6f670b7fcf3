//! Entity structs for persisted domain objects.
//!
//! Each entity maps to one table in the libSQL database. Entities derive
//! `Serialize`, `Deserialize`, and `JsonSchema` so they can be dumped for
//! debugging and validated like any other API type.

mod task;

pub use task::{COMPLETE, Task, completion_percentage};
