//! OpenAPI 3.1 description of the HTTP surface.
//!
//! Component schemas are generated from todo-core types with definitions
//! rooted at `#/components/schemas`, so `$ref`s resolve inside the document.

use schemars::{JsonSchema, SchemaGenerator, generate::SchemaSettings};
use serde_json::{Map, Value, json};

use todo_core::requests::{DEFAULT_QUERY_LIMIT, TaskCreate, TaskQuery, TaskUpdate};
use todo_core::responses::{ErrorBody, TaskRead, TaskReadList};

/// Path prefix shared by every task endpoint.
pub const API_PREFIX: &str = "/api/v1";

fn component_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn response(description: &str, schema: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(component_ref(schema)),
    })
}

fn task_id_param() -> Value {
    json!({
        "name": "task_id",
        "in": "query",
        "required": true,
        "schema": { "type": "string", "format": "uuid" },
    })
}

/// Generate the component schemas of every request and response type.
#[must_use]
pub fn components() -> Map<String, Value> {
    let settings = SchemaSettings::draft2020_12().with(|s| {
        s.definitions_path = "/components/schemas".into();
    });
    let mut generator = SchemaGenerator::new(settings);

    register::<TaskCreate>(&mut generator);
    register::<TaskUpdate>(&mut generator);
    register::<TaskQuery>(&mut generator);
    register::<TaskRead>(&mut generator);
    register::<TaskReadList>(&mut generator);
    register::<ErrorBody>(&mut generator);

    generator.definitions().clone()
}

fn register<T: JsonSchema>(generator: &mut SchemaGenerator) {
    // Structs are emitted as definitions; the returned `$ref` is not needed here.
    let _ = generator.subschema_for::<T>();
}

/// Build the OpenAPI 3.1 document served at `/openapi.json`.
#[must_use]
pub fn document(title: &str, version: &str) -> Value {
    let tasks_path = format!("{API_PREFIX}/tasks");
    let not_found = response("Task not found", "ErrorBody");
    let invalid = response("Validation error", "ErrorBody");

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": title,
            "version": version,
        },
        "paths": {
            tasks_path: {
                "get": {
                    "summary": "List tasks",
                    "operationId": "get_tasks",
                    "parameters": [
                        {
                            "name": "title",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive substring of the title",
                            "schema": { "type": "string" },
                        },
                        {
                            "name": "offset",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "integer", "minimum": 0, "default": 0 },
                        },
                        {
                            "name": "limit",
                            "in": "query",
                            "required": false,
                            "schema": {
                                "type": "integer",
                                "minimum": 0,
                                "maximum": DEFAULT_QUERY_LIMIT,
                                "default": DEFAULT_QUERY_LIMIT,
                            },
                        },
                        {
                            "name": "asc",
                            "in": "query",
                            "required": false,
                            "description": "Sort ascending by creation time",
                            "schema": { "type": "boolean", "default": true },
                        },
                    ],
                    "responses": {
                        "200": response("Matching tasks and their total count", "TaskReadList"),
                        "422": invalid.clone(),
                    },
                },
                "post": {
                    "summary": "Create a task",
                    "operationId": "create_task",
                    "requestBody": {
                        "required": true,
                        "content": json_content(component_ref("TaskCreate")),
                    },
                    "responses": {
                        "201": response("Created task", "TaskRead"),
                        "422": invalid.clone(),
                    },
                },
                "put": {
                    "summary": "Replace a task's mutable fields",
                    "operationId": "update_task",
                    "parameters": [task_id_param()],
                    "requestBody": {
                        "required": true,
                        "content": json_content(component_ref("TaskUpdate")),
                    },
                    "responses": {
                        "200": response("Updated task", "TaskRead"),
                        "404": not_found.clone(),
                        "422": invalid.clone(),
                    },
                },
                "patch": {
                    "summary": "Update the provided fields of a task",
                    "operationId": "patch_task",
                    "parameters": [task_id_param()],
                    "requestBody": {
                        "required": true,
                        "content": json_content(component_ref("TaskUpdate")),
                    },
                    "responses": {
                        "200": response("Updated task", "TaskRead"),
                        "404": not_found.clone(),
                        "422": invalid,
                    },
                },
                "delete": {
                    "summary": "Delete a task",
                    "operationId": "delete_task",
                    "parameters": [task_id_param()],
                    "responses": {
                        "204": { "description": "Task deleted" },
                        "404": not_found,
                    },
                },
            },
        },
        "components": {
            "schemas": components(),
        },
    })
}
