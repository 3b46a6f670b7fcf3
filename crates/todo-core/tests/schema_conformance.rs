//! Values produced by serde must satisfy the JSON Schemas derived for the same
//! types, since request bodies are checked against those schemas before they
//! are deserialized.

use chrono::Utc;
use schemars::schema_for;
use serde_json::{Value, json};
use uuid::Uuid;

use todo_core::entities::Task;
use todo_core::requests::{TaskCreate, TaskIdQuery, TaskQuery, TaskUpdate};
use todo_core::responses::{ErrorBody, TaskRead, TaskReadList};

fn schema_errors(schema: &Value, instance: &Value) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator.iter_errors(instance).map(|e| e.to_string()).collect()
}

macro_rules! conforms {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = schema_errors(&schema, &instance);
            assert!(
                errors.is_empty(),
                "{} does not match its schema: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

conforms!(
    task_conforms,
    Task,
    Task {
        id: Uuid::new_v4(),
        title: "Отложенная задача".into(),
        description: None,
        is_completed: false,
        time_to_complete: Some(10),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

conforms!(
    task_create_conforms,
    TaskCreate,
    TaskCreate::new("Обычная задача").with_description("без срока")
);

conforms!(
    task_update_clearing_description_conforms,
    TaskUpdate,
    TaskUpdate {
        title: None,
        description: Some(None),
        is_completed: Some(true),
    }
);

conforms!(task_query_conforms, TaskQuery, TaskQuery::default());

conforms!(
    task_id_query_conforms,
    TaskIdQuery,
    TaskIdQuery {
        task_id: Uuid::new_v4()
    }
);

conforms!(
    task_read_list_conforms,
    TaskReadList,
    TaskReadList {
        count: 1,
        tasks: vec![TaskRead {
            id: Uuid::new_v4(),
            title: "Обычная задача".into(),
            description: Some("d".into()),
            is_completed: true,
            completion: 100,
        }],
    }
);

conforms!(
    error_body_conforms,
    ErrorBody,
    ErrorBody::new("Validation error").with_errors(vec!["/title: required".into()])
);

#[test]
fn create_schema_rejects_what_validation_rejects() {
    let schema = serde_json::to_value(schema_for!(TaskCreate)).unwrap();

    assert!(!schema_errors(&schema, &json!({"description": "no title"})).is_empty());
    assert!(!schema_errors(&schema, &json!({"title": "t", "time_to_complete": 9})).is_empty());
    assert!(!schema_errors(&schema, &json!({"title": "t", "time_to_complete": 301})).is_empty());
    assert!(schema_errors(&schema, &json!({"title": "t", "time_to_complete": 300})).is_empty());
}

#[test]
fn update_schema_accepts_empty_and_null() {
    let schema = serde_json::to_value(schema_for!(TaskUpdate)).unwrap();

    assert!(schema_errors(&schema, &json!({})).is_empty());
    assert!(schema_errors(&schema, &json!({"description": null})).is_empty());
    assert!(!schema_errors(&schema, &json!({"is_completed": "yes"})).is_empty());
}

#[test]
fn completion_above_100_is_outside_schema() {
    let schema = serde_json::to_value(schema_for!(TaskRead)).unwrap();
    let instance = json!({
        "id": Uuid::new_v4(),
        "title": "t",
        "description": null,
        "is_completed": false,
        "completion": 101,
    });
    assert!(!schema_errors(&schema, &instance).is_empty());
}
