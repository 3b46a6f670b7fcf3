//! Task update builder.

use todo_core::requests::TaskUpdate;

/// Fluent construction of a [`TaskUpdate`] for code paths that are not fed
/// by a request body.
#[derive(Debug, Default)]
pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    /// Set or clear (`None`) the description.
    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn is_completed(mut self, is_completed: bool) -> Self {
        self.0.is_completed = Some(is_completed);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}
