//! Request shapes accepted by the task service.
//!
//! Update inputs track whether a field was provided with `Option`: `None`
//! means "not provided", `Some(value)` means "set to value". Nullable columns
//! use `Option<Option<T>>` so an explicit JSON `null` can clear them.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// First row returned by a list query unless the caller asks otherwise.
pub const DEFAULT_QUERY_OFFSET: u32 = 0;
/// Page size for list queries, also the largest page a caller may request.
pub const DEFAULT_QUERY_LIMIT: u32 = 100;
/// Shortest deadline accepted at creation, in seconds.
pub const MIN_TIME_TO_COMPLETE: u32 = 10;
/// Longest deadline accepted at creation, in seconds.
pub const MAX_TIME_TO_COMPLETE: u32 = 300;

const fn default_limit() -> u32 {
    DEFAULT_QUERY_LIMIT
}

const fn default_asc() -> bool {
    true
}

/// Deserialize a present key (including `null`) as `Some(..)`.
///
/// Combined with `#[serde(default)]`, a missing key stays `None`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// TaskCreate
// ---------------------------------------------------------------------------

/// Input for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskCreate {
    /// Task title.
    pub title: String,

    /// Task description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Seconds until the task completes on its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 10, max = 300))]
    pub time_to_complete: Option<u32>,
}

impl TaskCreate {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            time_to_complete: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_time_to_complete(mut self, secs: u32) -> Self {
        self.time_to_complete = Some(secs);
        self
    }

    /// Check domain constraints.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `time_to_complete` is outside
    /// `MIN_TIME_TO_COMPLETE..=MAX_TIME_TO_COMPLETE`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(secs) = self.time_to_complete {
            if !(MIN_TIME_TO_COMPLETE..=MAX_TIME_TO_COMPLETE).contains(&secs) {
                return Err(CoreError::Validation(format!(
                    "time_to_complete must be between {MIN_TIME_TO_COMPLETE} and {MAX_TIME_TO_COMPLETE} seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TaskUpdate
// ---------------------------------------------------------------------------

/// Input for updating a task.
///
/// Used for both update flavours: a partial update writes only the provided
/// fields, a full update also writes the declared defaults (`description`
/// cleared, `is_completed = false`) for the ones left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Task title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Task description; `null` clears it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    #[schemars(with = "Option<String>")]
    pub description: Option<Option<String>>,

    /// Completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskUpdate {
    /// Whether no field was provided at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_completed.is_none()
    }

    /// Check the constraints of a full update.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `title` is missing: it has no
    /// default, so a full update cannot be expressed without it.
    pub fn validate_full(&self) -> Result<(), CoreError> {
        if self.title.is_none() {
            return Err(CoreError::Validation(
                "title is required for a full update".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for listing tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskQuery {
    /// Case-insensitive substring of the task title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Number of rows to skip.
    #[serde(default)]
    pub offset: u32,

    /// Page size.
    #[serde(default = "default_limit")]
    #[schemars(range(max = 100))]
    pub limit: u32,

    /// Sort ascending by creation time.
    #[serde(default = "default_asc")]
    pub asc: bool,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            title: None,
            offset: DEFAULT_QUERY_OFFSET,
            limit: default_limit(),
            asc: default_asc(),
        }
    }
}

impl TaskQuery {
    /// Check paging constraints.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `limit` exceeds `DEFAULT_QUERY_LIMIT`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.limit > DEFAULT_QUERY_LIMIT {
            return Err(CoreError::Validation(format!(
                "limit must be at most {DEFAULT_QUERY_LIMIT}, got {}",
                self.limit
            )));
        }
        Ok(())
    }

    /// Title filter with surrounding whitespace removed; blank counts as absent.
    #[must_use]
    pub fn title_filter(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// Query parameter identifying a single task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskIdQuery {
    /// Task identifier.
    pub task_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(None, true)]
    #[case(Some(9), false)]
    #[case(Some(10), true)]
    #[case(Some(300), true)]
    #[case(Some(301), false)]
    fn create_time_to_complete_range(#[case] secs: Option<u32>, #[case] ok: bool) {
        let input = TaskCreate {
            title: "Отложенная задача".into(),
            description: None,
            time_to_complete: secs,
        };
        assert_eq!(input.validate().is_ok(), ok);
    }

    #[test]
    fn create_deserializes_with_defaults() {
        let input: TaskCreate = serde_json::from_str(r#"{"title": "Обычная задача"}"#).unwrap();
        assert_eq!(input, TaskCreate::new("Обычная задача"));
    }

    #[test]
    fn update_distinguishes_missing_from_null() {
        let missing: TaskUpdate = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert_eq!(missing.description, None);

        let null: TaskUpdate = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: TaskUpdate = serde_json::from_str(r#"{"description": "d"}"#).unwrap();
        assert_eq!(set.description, Some(Some("d".into())));
    }

    #[test]
    fn update_serializes_only_provided_fields() {
        let update = TaskUpdate {
            is_completed: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"is_completed": true})
        );
    }

    #[test]
    fn full_update_requires_title() {
        assert!(TaskUpdate::default().validate_full().is_err());
        let update = TaskUpdate {
            title: Some("t".into()),
            ..Default::default()
        };
        assert!(update.validate_full().is_ok());
    }

    #[test]
    fn query_defaults() {
        let query: TaskQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, TaskQuery::default());
        assert_eq!(query.limit, 100);
        assert_eq!(query.offset, 0);
        assert!(query.asc);
    }

    #[test]
    fn query_limit_capped() {
        let query = TaskQuery {
            limit: 101,
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("   "), None)]
    #[case(Some(" обычная "), Some("обычная"))]
    fn query_title_filter(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        let query = TaskQuery {
            title: raw.map(String::from),
            ..Default::default()
        };
        assert_eq!(query.title_filter(), expected);
    }
}
