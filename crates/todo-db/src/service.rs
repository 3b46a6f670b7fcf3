//! Service layer orchestrating task operations.
//!
//! `TaskService` validates domain input, runs the accessor on the caller's
//! session, turns "no row" into `CoreError::NotFound`, and hands deadlines to
//! the [`CompletionScheduler`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use todo_core::errors::CoreError;
use todo_core::requests::{TaskCreate, TaskQuery, TaskUpdate};
use todo_core::responses::{TaskRead, TaskReadList};

use crate::dao::Condition;
use crate::error::ServiceError;
use crate::repos::task::{TaskDao, id_is, title_contains};
use crate::scheduler::{CompletionScheduler, TokioScheduler};
use crate::{Session, TodoDb};

/// Task operations shared by every request handler.
#[derive(Clone)]
pub struct TaskService {
    db: TodoDb,
    scheduler: Arc<dyn CompletionScheduler>,
}

impl TaskService {
    /// Service with the default tokio-backed scheduler.
    #[must_use]
    pub fn new(db: TodoDb) -> Self {
        Self::with_scheduler(db, Arc::new(TokioScheduler))
    }

    #[must_use]
    pub fn with_scheduler(db: TodoDb, scheduler: Arc<dyn CompletionScheduler>) -> Self {
        Self { db, scheduler }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TodoDb {
        &self.db
    }

    /// Create a task and, if it has a deadline, schedule its completion.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` for an out-of-range deadline; `DatabaseError`
    /// if the insert fails.
    pub async fn create_task(
        &self,
        session: &Session,
        input: &TaskCreate,
    ) -> Result<TaskRead, ServiceError> {
        input.validate()?;

        let task = TaskDao::add(session.conn(), input).await?;
        tracing::info!(task_id = %task.id, deadline = ?task.deadline(), "task created");

        if let Some(secs) = task.time_to_complete {
            self.scheduler
                .schedule(self.db.clone(), task.id, Duration::from_secs(u64::from(secs)));
        }

        Ok(TaskRead::from_task(&task, Utc::now()))
    }

    /// Page of tasks matching `query`, with the total number of matches.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` for a limit above the maximum; `DatabaseError`
    /// if a query fails.
    pub async fn get_tasks(
        &self,
        session: &Session,
        query: &TaskQuery,
    ) -> Result<TaskReadList, ServiceError> {
        query.validate()?;

        let conditions: Vec<Condition> = query
            .title_filter()
            .map(title_contains)
            .into_iter()
            .collect();
        let conn = session.conn();
        let count = TaskDao::count(conn, &conditions).await?;
        let tasks =
            TaskDao::get_tasks_data(conn, &conditions, query.offset, query.limit, query.asc)
                .await?;

        Ok(TaskReadList { count, tasks })
    }

    /// Replace a task's mutable fields; omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` without a title; `CoreError::NotFound` for an
    /// unknown id; `DatabaseError` if the update fails.
    pub async fn update_task(
        &self,
        session: &Session,
        task_id: Uuid,
        update: &TaskUpdate,
    ) -> Result<TaskRead, ServiceError> {
        update.validate_full()?;
        let read = TaskDao::update_task_full_data(session.conn(), task_id, update)
            .await?
            .ok_or_else(|| CoreError::task_not_found(task_id))?;
        tracing::info!(%task_id, "task updated");
        Ok(read)
    }

    /// Update only the provided fields of a task.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown id; `DatabaseError` if the update fails.
    pub async fn patch_task(
        &self,
        session: &Session,
        task_id: Uuid,
        update: &TaskUpdate,
    ) -> Result<TaskRead, ServiceError> {
        let read = TaskDao::update_task_partial_data(session.conn(), task_id, update)
            .await?
            .ok_or_else(|| CoreError::task_not_found(task_id))?;
        tracing::info!(%task_id, "task patched");
        Ok(read)
    }

    /// Delete a task permanently.
    ///
    /// # Errors
    ///
    /// `CoreError::NotFound` for an unknown id; `DatabaseError` if the delete fails.
    pub async fn delete_task(&self, session: &Session, task_id: Uuid) -> Result<(), ServiceError> {
        TaskDao::delete_returning_id(session.conn(), &[id_is(task_id)])
            .await?
            .ok_or_else(|| CoreError::task_not_found(task_id))?;
        tracing::info!(%task_id, "task deleted");
        Ok(())
    }
}
