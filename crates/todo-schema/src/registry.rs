//! Central schema registry for the Todo List API types.
//!
//! The `SchemaRegistry` builds JSON Schemas from todo-core types at
//! construction time using [`schemars::schema_for!`], compiles a `jsonschema`
//! validator for each, and validates arbitrary JSON values against them.

use std::collections::HashMap;

use jsonschema::Validator;
use schemars::schema_for;

use crate::error::SchemaError;

/// Registered name of the create payload schema.
pub const TASK_CREATE: &str = "task_create";
/// Registered name of the update payload schema.
pub const TASK_UPDATE: &str = "task_update";
/// Registered name of the list query schema.
pub const TASK_QUERY: &str = "task_query";

struct Entry {
    schema: serde_json::Value,
    validator: Result<Validator, String>,
}

/// Central store of the JSON Schemas of every request and response type.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Entry>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        let schema = serde_json::Value::from(schema_for!($ty));
        let validator = jsonschema::validator_for(&schema).map_err(|e| e.to_string());
        $map.insert($name, Entry { schema, validator });
    };
}

impl SchemaRegistry {
    /// Build a registry containing the entity, request, and response schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Entity ---
        register!(schemas, "task", todo_core::entities::Task);

        // --- Requests ---
        register!(schemas, TASK_CREATE, todo_core::requests::TaskCreate);
        register!(schemas, TASK_UPDATE, todo_core::requests::TaskUpdate);
        register!(schemas, TASK_QUERY, todo_core::requests::TaskQuery);
        register!(schemas, "task_id_query", todo_core::requests::TaskIdQuery);

        // --- Responses ---
        register!(schemas, "task_read", todo_core::responses::TaskRead);
        register!(schemas, "task_read_list", todo_core::responses::TaskReadList);
        register!(schemas, "error_body", todo_core::responses::ErrorBody);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name).map(|entry| &entry.schema)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Unknown` if the schema name is unknown,
    /// `SchemaError::Uncompiled` if the schema did not compile, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let entry = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaError::Unknown(name.to_string()))?;

        let validator = entry
            .validator
            .as_ref()
            .map_err(|reason| SchemaError::Uncompiled {
                name: name.to_string(),
                reason: reason.clone(),
            })?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{path}: {e}")
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
