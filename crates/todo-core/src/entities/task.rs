use chrono::{DateTime, TimeDelta, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion percentage of a finished task.
pub const COMPLETE: u8 = 100;

/// A unit of work with an optional deadline expressed as seconds from creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    /// Seconds between `created_at` and the deadline, captured at creation.
    pub time_to_complete: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Absolute deadline, if the task was created with one.
    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.time_to_complete
            .map(|secs| self.created_at + TimeDelta::seconds(i64::from(secs)))
    }

    /// Completion percentage as observed at `now`.
    #[must_use]
    pub fn completion_at(&self, now: DateTime<Utc>) -> u8 {
        completion_percentage(
            self.is_completed,
            self.created_at,
            self.time_to_complete,
            now,
        )
    }
}

/// Derive the completion percentage of a task.
///
/// An explicitly completed task is always 100. A task without a deadline is 0.
/// Otherwise progress is linear from 0 at `created_at` to 100 at the deadline,
/// floored to an integer, and stays at 100 once the deadline has passed.
///
/// The store computes the same value inside `SELECT`/`RETURNING`; this is the
/// in-memory counterpart for rows that are already materialized.
#[must_use]
pub fn completion_percentage(
    is_completed: bool,
    created_at: DateTime<Utc>,
    time_to_complete: Option<u32>,
    now: DateTime<Utc>,
) -> u8 {
    if is_completed {
        return COMPLETE;
    }
    let Some(total_secs) = time_to_complete.filter(|secs| *secs > 0) else {
        return 0;
    };

    let total_ms = i64::from(total_secs) * 1000;
    let elapsed_ms = (now - created_at).num_milliseconds().max(0);
    if elapsed_ms >= total_ms {
        return COMPLETE;
    }
    u8::try_from(elapsed_ms * 100 / total_ms).unwrap_or(COMPLETE)
}
