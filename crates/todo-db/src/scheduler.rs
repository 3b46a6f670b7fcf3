//! Best-effort delayed completion.
//!
//! A task created with a deadline is flipped to `is_completed = true` once the
//! deadline passes. Nothing is persisted: a pending flip is lost if the process
//! stops, and a failed flip is logged and dropped.

use std::time::Duration;

use uuid::Uuid;

use crate::TodoDb;
use crate::error::DatabaseError;
use crate::repos::task::{TaskDao, id_is};
use crate::updates::task::TaskUpdateBuilder;

/// Arranges for a task to be marked completed after a delay.
pub trait CompletionScheduler: Send + Sync {
    fn schedule(&self, db: TodoDb, task_id: Uuid, after: Duration);
}

/// Spawns one detached tokio task per scheduled completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl CompletionScheduler for TokioScheduler {
    fn schedule(&self, db: TodoDb, task_id: Uuid, after: Duration) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(%task_id, "no tokio runtime; delayed completion skipped");
            return;
        };

        handle.spawn(async move {
            tokio::time::sleep(after).await;
            match complete_task(&db, task_id).await {
                Ok(0) => tracing::debug!(%task_id, "task gone before its deadline"),
                Ok(_) => tracing::info!(%task_id, "task completed by deadline"),
                Err(e) => tracing::warn!(%task_id, error = %e, "delayed completion failed"),
            }
        });
    }
}

/// Mark `task_id` completed on a fresh session; returns rows updated.
///
/// # Errors
///
/// Returns `DatabaseError` if the session or the update fails.
pub async fn complete_task(db: &TodoDb, task_id: Uuid) -> Result<u64, DatabaseError> {
    let session = db.session().await?;
    let update = TaskUpdateBuilder::new().is_completed(true).build();
    TaskDao::partial_update_in_place(session.conn(), &[id_is(task_id)], &update).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;
    use todo_core::requests::TaskCreate;

    async fn add_deferred(db: &TodoDb) -> Uuid {
        let session = db.session().await.unwrap();
        TaskDao::add_returning_id(session.conn(), &TaskCreate::new("t").with_time_to_complete(10))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn complete_task_flips_flag() {
        let db = test_db().await;
        let id = add_deferred(&db).await;

        assert_eq!(complete_task(&db, id).await.unwrap(), 1);
        let session = db.session().await.unwrap();
        let read = TaskDao::get_task_data(session.conn(), id).await.unwrap().unwrap();
        assert!(read.is_completed);
    }

    #[tokio::test]
    async fn complete_task_on_deleted_task_is_noop() {
        let db = test_db().await;
        assert_eq!(complete_task(&db, Uuid::new_v4()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn tokio_scheduler_completes_after_delay() {
        let db = test_db().await;
        let id = add_deferred(&db).await;

        TokioScheduler.schedule(db.clone(), id, Duration::from_millis(50));

        {
            let session = db.session().await.unwrap();
            let early = TaskDao::get_task_data(session.conn(), id).await.unwrap().unwrap();
            assert!(!early.is_completed);
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
        let session = db.session().await.unwrap();
        let late = TaskDao::get_task_data(session.conn(), id).await.unwrap().unwrap();
        assert!(late.is_completed);
    }
}
