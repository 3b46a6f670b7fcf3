//! Response types returned as JSON by the `/api/v1/tasks` endpoints.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Task;

/// A task as the API reports it, with its derived completion percentage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskRead {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    /// Percentage in `0..=100`.
    #[serde(default)]
    #[schemars(range(max = 100))]
    pub completion: u8,
}

impl TaskRead {
    /// Project a task, deriving `completion` at `now`.
    #[must_use]
    pub fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            is_completed: task.is_completed,
            completion: task.completion_at(now),
        }
    }
}

/// Response from `GET /api/v1/tasks`.
///
/// `count` is the total number of tasks matching the filter, independent of
/// the requested page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskReadList {
    pub count: u64,
    pub tasks: Vec<TaskRead>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
    /// Individual validation failures, when the request was rejected as invalid.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    #[test]
    fn task_read_derives_completion() {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: "Обычная задача".into(),
            description: Some("без дедлайна".into()),
            is_completed: false,
            time_to_complete: Some(20),
            created_at: now - TimeDelta::seconds(10),
            updated_at: now,
        };

        let read = TaskRead::from_task(&task, now);
        assert_eq!(read.id, task.id);
        assert_eq!(read.title, task.title);
        assert_eq!(read.description, task.description);
        assert!(!read.is_completed);
        assert_eq!(read.completion, 50);
    }

    #[test]
    fn task_read_completion_defaults_to_zero() {
        let id = Uuid::new_v4();
        let read: TaskRead = serde_json::from_value(serde_json::json!({
            "id": id,
            "title": "t",
            "description": null,
            "is_completed": false,
        }))
        .unwrap();
        assert_eq!(read.completion, 0);
    }

    #[test]
    fn error_body_omits_empty_errors() {
        assert_eq!(
            serde_json::to_value(ErrorBody::new("Task not found")).unwrap(),
            serde_json::json!({"detail": "Task not found"})
        );
        let body = ErrorBody::new("Validation error").with_errors(vec!["title: required".into()]);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"detail": "Validation error", "errors": ["title: required"]})
        );
    }
}
