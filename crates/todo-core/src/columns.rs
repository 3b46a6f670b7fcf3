//! Column identifiers for the `tasks` table.
//!
//! Predicates and sort keys name columns through this enum so that no
//! caller-provided text ever ends up in SQL as an identifier.

use std::fmt;

// ---------------------------------------------------------------------------
// TaskColumn
// ---------------------------------------------------------------------------

/// A column of the `tasks` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskColumn {
    Id,
    Title,
    /// Unicode-lowercased copy of `title`, used for case-insensitive search.
    TitleFolded,
    Description,
    IsCompleted,
    TimeToComplete,
    CreatedAt,
    UpdatedAt,
}

impl TaskColumn {
    /// Every column, in table order.
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::Title,
        Self::TitleFolded,
        Self::Description,
        Self::IsCompleted,
        Self::TimeToComplete,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Return the column name used in SQL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::TitleFolded => "title_folded",
            Self::Description => "description",
            Self::IsCompleted => "is_completed",
            Self::TimeToComplete => "time_to_complete",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for TaskColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TaskColumn> for &'static str {
    fn from(column: TaskColumn) -> Self {
        column.as_str()
    }
}
